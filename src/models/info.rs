//! Display metadata for a boundary feature.

/// Integer id of a boundary feature. Never zero for a stored feature.
pub type FeatureId = i64;

/// Descriptive metadata of one boundary, decoded from its GeoJSON properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoDataInfo {
    pub id: FeatureId,

    /// Ancestor ids in the order they appear in the `parents` property
    pub parent_ids: Vec<FeatureId>,

    pub name: String,
    pub local_name: String,
    pub name_en: String,
}

impl GeoDataInfo {
    /// Get the name variant selected by `field`
    pub fn name_for(&self, field: NameField) -> &str {
        match field {
            NameField::Local => &self.local_name,
            NameField::Name => &self.name,
            NameField::English => &self.name_en,
        }
    }
}

/// Which name variant is used when assembling a place label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NameField {
    /// `local_name`
    #[default]
    Local,
    /// `name`
    Name,
    /// `name_en`
    English,
}

impl NameField {
    /// Parse the short form used in query strings ("local", "name", "en")
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "local" | "local_name" => Some(NameField::Local),
            "name" => Some(NameField::Name),
            "en" | "name_en" | "english" => Some(NameField::English),
            _ => None,
        }
    }
}
