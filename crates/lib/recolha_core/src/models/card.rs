//! Collection card models.

use serde::{Deserialize, Serialize};

use crate::sla::SlaTier;

/// A vehicle collection card, mirrored from the upstream workflow engine.
///
/// `created_at` stays the raw upstream string: the source emits anything
/// from RFC 3339 to bare dates to garbage, and the SLA classifier owns the
/// parsing rules.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub plate: String,
    pub driver_name: Option<String>,
    pub chofer_name: Option<String>,
    pub phase: String,
    pub created_at: Option<String>,
    pub chofer_email: Option<String>,
    pub responsible_company: Option<String>,
    pub vehicle_model: Option<String>,
    pub contact_phone: Option<String>,
    pub secondary_phone: Option<String>,
    pub client_email: Option<String>,
    pub registered_address: Option<String>,
    pub collection_address: Option<String>,
    pub map_link: Option<String>,
    pub origin_location: Option<String>,
    pub collection_value: Option<String>,
    pub additional_km_cost: Option<String>,
    pub public_url: Option<String>,
}

/// A card annotated with its SLA, computed fresh at read time and never
/// stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardWithSla {
    #[serde(flatten)]
    pub card: Card,
    /// Whole days elapsed since creation.
    pub sla: i64,
    pub sla_text: SlaTier,
}
