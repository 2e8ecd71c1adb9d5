use serde::{Deserialize, Serialize};

/// Restaurant referenced by reservations. Read-only to the booking core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub phone: Option<String>,
}
