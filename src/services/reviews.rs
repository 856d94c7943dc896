use std::sync::Arc;

use async_trait::async_trait;

use super::{client_fields, trainer_fields, EntityService};
use crate::{
    db::RecordStore,
    models::{
        client::Client,
        review::{Review, ReviewFields, ReviewPayload},
        trainer::Trainer,
        MissingField,
    },
};

pub struct ReviewService {
    reviews: Arc<dyn RecordStore<Review>>,
    clients: Arc<dyn RecordStore<Client>>,
    trainers: Arc<dyn RecordStore<Trainer>>,
}

impl ReviewService {
    pub fn new(
        reviews: Arc<dyn RecordStore<Review>>,
        clients: Arc<dyn RecordStore<Client>>,
        trainers: Arc<dyn RecordStore<Trainer>>,
    ) -> Self {
        Self {
            reviews,
            clients,
            trainers,
        }
    }
}

#[async_trait]
impl EntityService for ReviewService {
    type Record = Review;
    type Payload = ReviewPayload;

    const NAME: &'static str = "resenia";

    fn store(&self) -> &dyn RecordStore<Review> {
        self.reviews.as_ref()
    }

    fn payload_id(payload: &ReviewPayload) -> Option<i32> {
        payload.review.id
    }

    fn to_record(payload: &ReviewPayload) -> Result<Review, MissingField> {
        payload.to_record()
    }

    fn merge(payload: &ReviewPayload, review: &mut Review) {
        payload.merge_into(review);
    }

    async fn project(&self, review: Review) -> anyhow::Result<ReviewPayload> {
        Ok(ReviewPayload {
            review: ReviewFields::from(&review),
            client: client_fields(self.clients.as_ref(), review.client_id).await?,
            trainer: trainer_fields(self.trainers.as_ref(), review.trainer_id).await?,
        })
    }
}
