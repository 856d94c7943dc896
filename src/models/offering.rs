use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{merge_field, required, MissingField, Owner, Record};
use crate::models::trainer::TrainerFields;

/// A service a trainer sells. Exposed as `Servicio` on the wire.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Offering {
    pub id: Option<i32>,
    pub name: String,
    pub description: String,
    pub price: f32,
    pub location: String,
    pub trainer_id: Option<i32>,
}

impl Record for Offering {
    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn belongs_to(&self, owner: Owner) -> bool {
        owner.matches(None, self.trainer_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferingFields {
    #[serde(rename = "idServicio")]
    pub id: Option<i32>,
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: Option<f32>,
    #[serde(rename = "ubicacion")]
    pub location: Option<String>,
}

impl From<&Offering> for OfferingFields {
    fn from(o: &Offering) -> Self {
        Self {
            id: o.id,
            name: Some(o.name.clone()),
            description: Some(o.description.clone()),
            price: Some(o.price),
            location: Some(o.location.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferingPayload {
    #[serde(flatten)]
    pub offering: OfferingFields,
    #[serde(default, rename = "entrenador")]
    pub trainer: Option<TrainerFields>,
}

impl OfferingPayload {
    pub fn to_record(&self) -> Result<Offering, MissingField> {
        Ok(Offering {
            id: self.offering.id,
            name: required(&self.offering.name, "nombre")?,
            description: required(&self.offering.description, "descripcion")?,
            price: required(&self.offering.price, "precio")?,
            location: required(&self.offering.location, "ubicacion")?,
            trainer_id: self.trainer.as_ref().and_then(|t| t.id),
        })
    }

    pub fn merge_into(&self, offering: &mut Offering) {
        merge_field(&mut offering.name, &self.offering.name);
        merge_field(&mut offering.description, &self.offering.description);
        merge_field(&mut offering.price, &self.offering.price);
        merge_field(&mut offering.location, &self.offering.location);
    }
}
