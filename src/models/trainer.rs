use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{encoding, merge_field, merge_optional, required, MissingField, Record};
use crate::models::{offering::OfferingFields, review::ReviewFields, session::SessionFields};

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Trainer {
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub password: String,
    pub specialties: Vec<String>,
    /// Lives in `trainer_certifications`, loaded separately.
    #[sqlx(skip)]
    pub certifications: Vec<Vec<u8>>,
    pub profile_photo: Option<Vec<u8>>,
}

impl Record for Trainer {
    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerFields {
    #[serde(rename = "idEntrenador")]
    pub id: Option<i32>,
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "correo")]
    pub email: Option<String>,
    #[serde(rename = "contrasenia")]
    pub password: Option<String>,
    #[serde(rename = "especialidad")]
    pub specialties: Option<Vec<String>>,
    #[serde(rename = "certificaciones", with = "encoding::base64_list")]
    pub certifications: Option<Vec<Vec<u8>>>,
    #[serde(rename = "fotoPerfil", with = "encoding::base64_bytes")]
    pub profile_photo: Option<Vec<u8>>,
}

impl TrainerFields {
    pub fn to_record(&self) -> Result<Trainer, MissingField> {
        Ok(Trainer {
            id: self.id,
            name: required(&self.name, "nombre")?,
            email: required(&self.email, "correo")?,
            password: required(&self.password, "contrasenia")?,
            specialties: required(&self.specialties, "especialidad")?,
            certifications: self.certifications.clone().unwrap_or_default(),
            profile_photo: self.profile_photo.clone(),
        })
    }

    pub fn merge_into(&self, trainer: &mut Trainer) {
        merge_field(&mut trainer.name, &self.name);
        merge_field(&mut trainer.email, &self.email);
        merge_field(&mut trainer.password, &self.password);
        merge_field(&mut trainer.specialties, &self.specialties);
        merge_field(&mut trainer.certifications, &self.certifications);
        merge_optional(&mut trainer.profile_photo, &self.profile_photo);
    }
}

impl From<&Trainer> for TrainerFields {
    fn from(t: &Trainer) -> Self {
        Self {
            id: t.id,
            name: Some(t.name.clone()),
            email: Some(t.email.clone()),
            password: Some(t.password.clone()),
            specialties: Some(t.specialties.clone()),
            certifications: Some(t.certifications.clone()),
            profile_photo: t.profile_photo.clone(),
        }
    }
}

/// `/Entrenador` payload. The three collections are output-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainerPayload {
    #[serde(flatten)]
    pub trainer: TrainerFields,
    #[serde(default)]
    pub resenias: Vec<ReviewFields>,
    #[serde(default)]
    pub sesiones: Vec<SessionFields>,
    #[serde(default)]
    pub servicios: Vec<OfferingFields>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_replaces_lists_wholesale() {
        let mut trainer = Trainer {
            id: Some(3),
            name: "Luis".into(),
            email: "l@x.com".into(),
            password: "pw".into(),
            specialties: vec!["crossfit".into(), "yoga".into()],
            certifications: vec![b"cert-1".to_vec()],
            profile_photo: Some(b"old".to_vec()),
        };
        let patch = TrainerFields {
            specialties: Some(vec!["running".into()]),
            ..Default::default()
        };
        patch.merge_into(&mut trainer);

        assert_eq!(trainer.specialties, vec!["running".to_string()]);
        assert_eq!(trainer.certifications, vec![b"cert-1".to_vec()]);
        assert_eq!(trainer.profile_photo, Some(b"old".to_vec()));
        assert_eq!(trainer.name, "Luis");
    }

    #[test]
    fn test_certifications_default_to_empty_on_create() {
        let fields: TrainerFields = serde_json::from_str(
            r#"{"nombre":"Luis","correo":"l@x.com","contrasenia":"pw","especialidad":["yoga"]}"#,
        )
        .unwrap();
        let trainer = fields.to_record().unwrap();
        assert!(trainer.certifications.is_empty());
        assert!(trainer.id.is_none());
    }

    #[test]
    fn test_specialties_are_required() {
        let fields = TrainerFields {
            name: Some("Luis".into()),
            email: Some("l@x.com".into()),
            password: Some("pw".into()),
            ..Default::default()
        };
        assert_eq!(
            fields.to_record().unwrap_err().to_string(),
            "missing required field `especialidad`"
        );
    }
}
