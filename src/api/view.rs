use crate::domain_model::Article;

pub fn render_article(article: &Article) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
</head>
<body>
  <article>
    <h1>{title}</h1>
    <time datetime="{iso}">{date}</time>
    <p>{body}</p>
  </article>
</body>
</html>
"#,
        title = html_escape(&article.title),
        iso = article.published_at.to_rfc3339(),
        date = article.published_at.format("%Y-%m-%d %H:%M"),
        body = html_escape(&article.body),
    )
}

pub const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Login</title>
</head>
<body>
  <form id="login">
    <label>Username <input name="username" autocomplete="username" required></label>
    <label>Password <input name="password" type="password" autocomplete="current-password" required></label>
    <button type="submit">Log in</button>
  </form>
  <p id="message"></p>
  <script>
    document.getElementById("login").addEventListener("submit", async (event) => {
      event.preventDefault();
      const form = new FormData(event.target);
      const response = await fetch("/login", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify({ username: form.get("username"), password: form.get("password") }),
      });
      const payload = await response.json();
      document.getElementById("message").textContent = payload.message || payload.error;
    });
  </script>
</body>
</html>
"#;

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
