use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{merge_field, required, MissingField, Owner, Record};
use crate::models::{client::ClientFields, trainer::TrainerFields};

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Review {
    pub id: Option<i32>,
    pub rating: i32,
    pub comment: String,
    pub client_id: Option<i32>,
    pub trainer_id: Option<i32>,
}

impl Record for Review {
    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn belongs_to(&self, owner: Owner) -> bool {
        owner.matches(self.client_id, self.trainer_id)
    }
}

/// Rating is an uninterpreted integer; no bounds are enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewFields {
    #[serde(rename = "idResenia")]
    pub id: Option<i32>,
    #[serde(rename = "calificacion")]
    pub rating: Option<i32>,
    #[serde(rename = "comentario")]
    pub comment: Option<String>,
}

impl From<&Review> for ReviewFields {
    fn from(r: &Review) -> Self {
        Self {
            id: r.id,
            rating: Some(r.rating),
            comment: Some(r.comment.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewPayload {
    #[serde(flatten)]
    pub review: ReviewFields,
    #[serde(default, rename = "cliente")]
    pub client: Option<ClientFields>,
    #[serde(default, rename = "entrenador")]
    pub trainer: Option<TrainerFields>,
}

impl ReviewPayload {
    pub fn to_record(&self) -> Result<Review, MissingField> {
        Ok(Review {
            id: self.review.id,
            rating: required(&self.review.rating, "calificacion")?,
            comment: required(&self.review.comment, "comentario")?,
            client_id: self.client.as_ref().and_then(|c| c.id),
            trainer_id: self.trainer.as_ref().and_then(|t| t.id),
        })
    }

    /// References are fixed at creation and never merged.
    pub fn merge_into(&self, review: &mut Review) {
        merge_field(&mut review.rating, &self.review.rating);
        merge_field(&mut review.comment, &self.review.comment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_references_come_from_nested_ids() {
        let payload: ReviewPayload = serde_json::from_str(
            r#"{
                "calificacion": 5,
                "comentario": "Excelente",
                "cliente": {"idCliente": 7, "nombre": "Ana"},
                "entrenador": {"idEntrenador": 2}
            }"#,
        )
        .unwrap();
        let review = payload.to_record().unwrap();
        assert_eq!(review.client_id, Some(7));
        assert_eq!(review.trainer_id, Some(2));
        assert_eq!(review.rating, 5);
        assert!(review.belongs_to(Owner::Client(7)));
        assert!(review.belongs_to(Owner::Trainer(2)));
        assert!(!review.belongs_to(Owner::Client(2)));
    }

    #[test]
    fn test_merge_ignores_references() {
        let mut review = Review {
            id: Some(1),
            rating: 3,
            comment: "Bien".into(),
            client_id: Some(7),
            trainer_id: Some(2),
        };
        let patch = ReviewPayload {
            review: ReviewFields {
                id: Some(1),
                rating: Some(4),
                comment: None,
            },
            client: Some(ClientFields {
                id: Some(99),
                ..Default::default()
            }),
            trainer: None,
        };
        patch.merge_into(&mut review);

        assert_eq!(review.rating, 4);
        assert_eq!(review.comment, "Bien");
        assert_eq!(review.client_id, Some(7));
    }
}
