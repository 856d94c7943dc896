use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{encoding, merge_field, merge_optional, required, MissingField, Record};
use crate::models::review::ReviewFields;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Client {
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub password: String,
    pub profile_photo: Option<Vec<u8>>,
    pub birth_year: Option<i32>,
    pub height: Option<f32>,
    pub weight: Option<f32>,
    pub phone: String,
    pub location: String,
}

impl Record for Client {
    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }
}

/// A client's own fields as they appear on the wire, also used when a
/// review or session embeds its client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientFields {
    #[serde(rename = "idCliente")]
    pub id: Option<i32>,
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "correo")]
    pub email: Option<String>,
    #[serde(rename = "contrasenia")]
    pub password: Option<String>,
    #[serde(rename = "fotoPerfil", with = "encoding::base64_bytes")]
    pub profile_photo: Option<Vec<u8>>,
    #[serde(rename = "fechaNacimiento")]
    pub birth_year: Option<i32>,
    #[serde(rename = "estatura")]
    pub height: Option<f32>,
    #[serde(rename = "peso")]
    pub weight: Option<f32>,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    #[serde(rename = "ubicacion")]
    pub location: Option<String>,
}

impl ClientFields {
    pub fn to_record(&self) -> Result<Client, MissingField> {
        Ok(Client {
            id: self.id,
            name: required(&self.name, "nombre")?,
            email: required(&self.email, "correo")?,
            password: required(&self.password, "contrasenia")?,
            profile_photo: self.profile_photo.clone(),
            birth_year: self.birth_year,
            height: self.height,
            weight: self.weight,
            phone: required(&self.phone, "telefono")?,
            location: required(&self.location, "ubicacion")?,
        })
    }

    pub fn merge_into(&self, client: &mut Client) {
        merge_field(&mut client.name, &self.name);
        merge_field(&mut client.email, &self.email);
        merge_field(&mut client.password, &self.password);
        merge_optional(&mut client.profile_photo, &self.profile_photo);
        merge_optional(&mut client.birth_year, &self.birth_year);
        merge_optional(&mut client.height, &self.height);
        merge_optional(&mut client.weight, &self.weight);
        merge_field(&mut client.phone, &self.phone);
        merge_field(&mut client.location, &self.location);
    }
}

impl From<&Client> for ClientFields {
    fn from(c: &Client) -> Self {
        Self {
            id: c.id,
            name: Some(c.name.clone()),
            email: Some(c.email.clone()),
            password: Some(c.password.clone()),
            profile_photo: c.profile_photo.clone(),
            birth_year: c.birth_year,
            height: c.height,
            weight: c.weight,
            phone: Some(c.phone.clone()),
            location: Some(c.location.clone()),
        }
    }
}

/// `/Cliente` payload. `resenias` is filled on output and ignored on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientPayload {
    #[serde(flatten)]
    pub client: ClientFields,
    #[serde(default)]
    pub resenias: Vec<ReviewFields>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> Client {
        Client {
            id: Some(1),
            name: "Ana".into(),
            email: "a@x.com".into(),
            password: "secret".into(),
            profile_photo: None,
            birth_year: Some(1995),
            height: Some(1.65),
            weight: None,
            phone: "555-1111".into(),
            location: "Bogotá".into(),
        }
    }

    #[test]
    fn test_merge_only_touches_present_fields() {
        let mut client = ana();
        let patch = ClientFields {
            id: Some(1),
            phone: Some("555-0000".into()),
            weight: Some(58.5),
            ..Default::default()
        };
        patch.merge_into(&mut client);

        assert_eq!(client.phone, "555-0000");
        assert_eq!(client.weight, Some(58.5));
        assert_eq!(client.name, "Ana");
        assert_eq!(client.email, "a@x.com");
        assert_eq!(client.height, Some(1.65));
        assert_eq!(client.birth_year, Some(1995));
    }

    #[test]
    fn test_to_record_requires_not_null_columns() {
        let mut fields = ClientFields::from(&ana());
        fields.phone = None;
        let err = fields.to_record().unwrap_err();
        assert_eq!(err.to_string(), "missing required field `telefono`");
    }

    #[test]
    fn test_wire_names_and_ignored_collections() {
        let payload: ClientPayload = serde_json::from_str(
            r#"{
                "idCliente": null,
                "nombre": "Ana",
                "correo": "a@x.com",
                "contrasenia": "secret",
                "telefono": "555-1111",
                "ubicacion": "Bogotá",
                "estatura": 1.65,
                "sesiones": [],
                "resenias": []
            }"#,
        )
        .unwrap();
        assert_eq!(payload.client.name.as_deref(), Some("Ana"));
        assert_eq!(payload.client.height, Some(1.65));
        assert!(payload.client.id.is_none());

        let json = serde_json::to_value(ClientPayload {
            client: ClientFields::from(&ana()),
            resenias: Vec::new(),
        })
        .unwrap();
        assert_eq!(json["idCliente"], 1);
        assert_eq!(json["telefono"], "555-1111");
        assert!(json["fotoPerfil"].is_null());
        assert_eq!(json["resenias"], serde_json::json!([]));
    }
}
