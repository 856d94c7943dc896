pub mod client;
pub mod encoding;
pub mod offering;
pub mod review;
pub mod session;
pub mod trainer;

/// A persisted row with a store-generated integer key.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> Option<i32>;

    fn set_id(&mut self, id: i32);

    /// Whether this record references the given client or trainer.
    /// Clients and trainers reference nobody and keep the default.
    fn belongs_to(&self, _owner: Owner) -> bool {
        false
    }
}

/// The side of a foreign key that other records point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Client(i32),
    Trainer(i32),
}

impl Owner {
    pub(crate) fn matches(self, client_id: Option<i32>, trainer_id: Option<i32>) -> bool {
        match self {
            Owner::Client(id) => client_id == Some(id),
            Owner::Trainer(id) => trainer_id == Some(id),
        }
    }
}

/// A create payload lacked a field the relational schema declares NOT NULL.
#[derive(Debug, thiserror::Error)]
#[error("missing required field `{0}`")]
pub struct MissingField(pub &'static str);

pub(crate) fn required<T: Clone>(value: &Option<T>, field: &'static str) -> Result<T, MissingField> {
    value.clone().ok_or(MissingField(field))
}

/// Overwrite `target` only when the payload carried a value.
pub(crate) fn merge_field<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

/// Same as [`merge_field`] for columns that are nullable in storage.
pub(crate) fn merge_optional<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        *target = value.clone();
    }
}
