use std::sync::Arc;

use async_trait::async_trait;

use super::EntityService;
use crate::{
    db::RecordStore,
    models::{
        client::{Client, ClientFields, ClientPayload},
        review::{Review, ReviewFields},
        MissingField, Owner,
    },
};

pub struct ClientService {
    clients: Arc<dyn RecordStore<Client>>,
    reviews: Arc<dyn RecordStore<Review>>,
}

impl ClientService {
    pub fn new(clients: Arc<dyn RecordStore<Client>>, reviews: Arc<dyn RecordStore<Review>>) -> Self {
        Self { clients, reviews }
    }
}

#[async_trait]
impl EntityService for ClientService {
    type Record = Client;
    type Payload = ClientPayload;

    const NAME: &'static str = "cliente";

    fn store(&self) -> &dyn RecordStore<Client> {
        self.clients.as_ref()
    }

    fn payload_id(payload: &ClientPayload) -> Option<i32> {
        payload.client.id
    }

    fn to_record(payload: &ClientPayload) -> Result<Client, MissingField> {
        payload.client.to_record()
    }

    fn merge(payload: &ClientPayload, client: &mut Client) {
        payload.client.merge_into(client);
    }

    async fn project(&self, client: Client) -> anyhow::Result<ClientPayload> {
        let resenias = match client.id {
            Some(id) => self
                .reviews
                .find_by_owner(Owner::Client(id))
                .await?
                .iter()
                .map(ReviewFields::from)
                .collect(),
            None => Vec::new(),
        };
        Ok(ClientPayload {
            client: ClientFields::from(&client),
            resenias,
        })
    }
}
