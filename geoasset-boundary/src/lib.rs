use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[cfg(feature = "entity-conversions")]
pub use conv::InvalidLocation;

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id          : Option<i64>,
    pub name        : String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description : Option<String>,
    pub latitude    : f64,
    pub longitude   : f64,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct NewLocation {
    pub name        : String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description : Option<String>,
    pub latitude    : f64,
    pub longitude   : f64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct JwtToken {
    pub token: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(
    feature = "extra-derive",
    derive(Debug, Clone, PartialEq, Eq, thiserror::Error)
)]
#[cfg_attr(feature = "extra-derive", error("{message}"))]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default, alias = "title")]
    pub message: String,
}
