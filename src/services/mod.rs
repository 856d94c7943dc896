pub mod clients;
pub mod offerings;
pub mod reviews;
pub mod sessions;
pub mod trainers;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    db::RecordStore,
    models::{
        client::{Client, ClientFields},
        trainer::{Trainer, TrainerFields},
        MissingField, Record,
    },
};

/// Create / merge / delete rules shared by every entity type.
///
/// Implementors supply the store, the payload <-> record conversions and the
/// wire projection; the operations themselves are written once here.
#[async_trait]
pub trait EntityService: Send + Sync + 'static {
    type Record: Record;
    type Payload: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    /// Entity name used in logs.
    const NAME: &'static str;

    fn store(&self) -> &dyn RecordStore<Self::Record>;

    fn payload_id(payload: &Self::Payload) -> Option<i32>;

    fn to_record(payload: &Self::Payload) -> Result<Self::Record, MissingField>;

    /// Copy every non-null field of `payload` onto `record`.
    fn merge(payload: &Self::Payload, record: &mut Self::Record);

    /// Build the wire representation, resolving references through the
    /// other stores.
    async fn project(&self, record: Self::Record) -> anyhow::Result<Self::Payload>;

    async fn list(&self) -> anyhow::Result<Vec<Self::Payload>> {
        let records = self.store().find_all().await?;
        let mut payloads = Vec::with_capacity(records.len());
        for record in records {
            payloads.push(self.project(record).await?);
        }
        Ok(payloads)
    }

    async fn get(&self, id: i32) -> anyhow::Result<Option<Self::Payload>> {
        match self.store().find_by_id(id).await? {
            Some(record) => Ok(Some(self.project(record).await?)),
            None => Ok(None),
        }
    }

    /// A payload whose id already exists is returned untouched; nothing is
    /// written. The lookup and the insert are not atomic.
    async fn create(&self, payload: Self::Payload) -> anyhow::Result<Self::Payload> {
        if let Some(id) = Self::payload_id(&payload) {
            if self.store().find_by_id(id).await?.is_some() {
                tracing::debug!(entity = Self::NAME, id, "create skipped, id already taken");
                return Ok(payload);
            }
        }

        let record = Self::to_record(&payload)?;
        let saved = self.store().save(record).await?;
        tracing::info!(entity = Self::NAME, id = ?saved.id(), "created");
        self.project(saved).await
    }

    /// Without an id, or with an unknown one, the payload comes back untouched.
    async fn update(&self, payload: Self::Payload) -> anyhow::Result<Self::Payload> {
        let Some(id) = Self::payload_id(&payload) else {
            tracing::debug!(entity = Self::NAME, "update skipped, no id");
            return Ok(payload);
        };
        let Some(mut record) = self.store().find_by_id(id).await? else {
            tracing::debug!(entity = Self::NAME, id, "update skipped, no such record");
            return Ok(payload);
        };

        Self::merge(&payload, &mut record);
        let saved = self.store().save(record).await?;
        tracing::info!(entity = Self::NAME, id, "updated");
        self.project(saved).await
    }

    /// `false` when nothing had that id.
    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        if self.store().find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        self.store().delete(id).await?;
        tracing::info!(entity = Self::NAME, id, "deleted");
        Ok(true)
    }

    async fn delete_all(&self) -> bool {
        match self.store().delete_all().await {
            Ok(()) => {
                tracing::info!(entity = Self::NAME, "deleted all");
                true
            }
            Err(e) => {
                tracing::warn!(entity = Self::NAME, "delete all failed: {e:#}");
                false
            }
        }
    }
}

pub(crate) async fn client_fields(
    clients: &dyn RecordStore<Client>,
    id: Option<i32>,
) -> anyhow::Result<Option<ClientFields>> {
    let Some(id) = id else { return Ok(None) };
    Ok(clients.find_by_id(id).await?.as_ref().map(ClientFields::from))
}

pub(crate) async fn trainer_fields(
    trainers: &dyn RecordStore<Trainer>,
    id: Option<i32>,
) -> anyhow::Result<Option<TrainerFields>> {
    let Some(id) = id else { return Ok(None) };
    Ok(trainers.find_by_id(id).await?.as_ref().map(TrainerFields::from))
}
