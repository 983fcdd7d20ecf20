use super::UserDocument;
use crate::settings::Mongo;
use anyhow::Result;
use mongodb::bson::doc;
use mongodb::{Client, Collection};

pub async fn connect_client(settings: &Mongo) -> Result<Client> {
    let client = Client::with_uri_str(&settings.uri).await?;
    client
        .database(&settings.database)
        .run_command(doc! { "ping": 1 })
        .await?;
    Ok(client)
}

pub fn users_collection(client: &Client, settings: &Mongo) -> Collection<UserDocument> {
    client
        .database(&settings.database)
        .collection::<UserDocument>(&settings.collection)
}
