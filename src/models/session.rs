use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{encoding, merge_field, required, MissingField, Owner, Record};
use crate::models::{client::ClientFields, trainer::TrainerFields};

/// A booked training session. `status` is free text with no transition rules.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Session {
    pub id: Option<i32>,
    pub scheduled_at: NaiveDateTime,
    pub status: String,
    pub client_id: Option<i32>,
    pub trainer_id: Option<i32>,
}

impl Record for Session {
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

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionFields {
    #[serde(rename = "idSesion")]
    pub id: Option<i32>,
    #[serde(rename = "fechaHora", with = "encoding::local_datetime")]
    pub scheduled_at: Option<NaiveDateTime>,
    #[serde(rename = "estado")]
    pub status: Option<String>,
}

impl From<&Session> for SessionFields {
    fn from(s: &Session) -> Self {
        Self {
            id: s.id,
            scheduled_at: Some(s.scheduled_at),
            status: Some(s.status.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionPayload {
    #[serde(flatten)]
    pub session: SessionFields,
    #[serde(default, rename = "cliente")]
    pub client: Option<ClientFields>,
    #[serde(default, rename = "entrenador")]
    pub trainer: Option<TrainerFields>,
}

impl SessionPayload {
    pub fn to_record(&self) -> Result<Session, MissingField> {
        Ok(Session {
            id: self.session.id,
            scheduled_at: required(&self.session.scheduled_at, "fechaHora")?,
            status: required(&self.session.status, "estado")?,
            client_id: self.client.as_ref().and_then(|c| c.id),
            trainer_id: self.trainer.as_ref().and_then(|t| t.id),
        })
    }

    pub fn merge_into(&self, session: &mut Session) {
        merge_field(&mut session.scheduled_at, &self.session.scheduled_at);
        merge_field(&mut session.status, &self.session.status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_status_update_keeps_schedule() {
        let at = NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(7, 30, 0)
            .unwrap();
        let mut session = Session {
            id: Some(5),
            scheduled_at: at,
            status: "Pendiente".into(),
            client_id: Some(1),
            trainer_id: Some(2),
        };
        let patch: SessionPayload =
            serde_json::from_str(r#"{"idSesion": 5, "estado": "Completada"}"#).unwrap();
        patch.merge_into(&mut session);

        assert_eq!(session.status, "Completada");
        assert_eq!(session.scheduled_at, at);
        assert_eq!(session.client_id, Some(1));
    }

    #[test]
    fn test_minute_precision_input_and_references() {
        let payload: SessionPayload = serde_json::from_str(
            r#"{"fechaHora": "2024-06-03 07:30", "estado": "Pendiente", "cliente": {"idCliente": 1}}"#,
        )
        .unwrap();
        let session = payload.to_record().unwrap();
        assert_eq!(session.client_id, Some(1));
        assert_eq!(session.trainer_id, None);

        let json = serde_json::to_value(SessionFields::from(&session)).unwrap();
        assert_eq!(json["fechaHora"], "2024-06-03T07:30:00");
        assert_eq!(json["estado"], "Pendiente");
    }
}
