use serde::Deserialize;

/// A commune record from the geocoding API.
///
/// The lookup only ever requests the `nom` field; a record without it is a
/// parse failure, not an empty name.
#[derive(Debug, Clone, Deserialize)]
pub struct Commune {
    #[serde(rename = "nom")]
    pub name: String,
}
