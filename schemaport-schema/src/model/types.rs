//! Canonical field types.

use serde::{Deserialize, Serialize};

/// Lifecycle status shared by every model element.
///
/// Only active elements take part in rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// In use.
    #[default]
    Active,
    /// Kept for history; ignored by generation.
    Inactive,
}

impl Status {
    /// Check if the element is active.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Storage width of an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntegerSize {
    /// 8 bits.
    #[serde(rename = "8")]
    Eight,
    /// 16 bits.
    #[serde(rename = "16")]
    Sixteen,
    /// 24 bits.
    #[serde(rename = "24")]
    TwentyFour,
    /// 32 bits.
    #[serde(rename = "32")]
    ThirtyTwo,
    /// 64 bits.
    #[serde(rename = "64")]
    SixtyFour,
}

impl IntegerSize {
    /// Number of bits.
    pub fn bits(&self) -> u8 {
        match self {
            Self::Eight => 8,
            Self::Sixteen => 16,
            Self::TwentyFour => 24,
            Self::ThirtyTwo => 32,
            Self::SixtyFour => 64,
        }
    }
}

/// Configuration of an integer field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegerConfig {
    /// Storage width; `None` means the dialect default.
    #[serde(default)]
    pub size: Option<IntegerSize>,
}

/// Maximum length of a character field. Zero means unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeConfig {
    /// Maximum size in characters.
    #[serde(default)]
    pub max_size: u64,
}

/// Where the bytes of a file-like field live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageMode {
    /// Stored inline as a binary column.
    #[default]
    Binary,
    /// Stored elsewhere; the column holds a reference.
    ObjectStore,
}

/// Configuration of a file, image, audio or video field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    /// Storage mode.
    #[serde(default)]
    pub storage: StorageMode,
    /// Maximum size in bytes. Zero means unset.
    #[serde(default)]
    pub max_size: u64,
}

/// Configuration of an enum field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumConfig {
    /// Whether several members may be selected at once.
    #[serde(default)]
    pub allow_multiple: bool,
}

/// The canonical type of a field, with its per-variant configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    /// UUID.
    Uuid,
    /// Integer with an optional width.
    Integer(IntegerConfig),
    /// Floating point number.
    Float,
    /// Exact decimal.
    Decimal,
    /// Boolean.
    Boolean,
    /// Fixed-length string.
    Char(SizeConfig),
    /// Variable-length string.
    Varchar(SizeConfig),
    /// Long text.
    Text(SizeConfig),
    /// Encrypted string payload.
    Encrypted(SizeConfig),
    /// Email address.
    Email,
    /// URL.
    Url,
    /// Phone number.
    Phone,
    /// Color value.
    Color,
    /// Location or address.
    Location,
    /// URL slug.
    Slug,
    /// Rich text document.
    #[serde(rename = "RICHTEXT")]
    RichText,
    /// Source code.
    Code,
    /// Markdown document.
    Markdown,
    /// Generic file.
    File(FileConfig),
    /// Image file.
    Image(FileConfig),
    /// Audio file.
    Audio(FileConfig),
    /// Video file.
    Video(FileConfig),
    /// Enumeration.
    Enum(EnumConfig),
    /// JSON document.
    Json,
    /// JSON array.
    Array,
    /// Calendar date.
    Date,
    /// Date and time.
    #[serde(rename = "DATETIME")]
    DateTime,
    /// Time of day.
    Time,
    /// Unrecognized catalog type.
    Invalid,
}

impl FieldType {
    /// Integer with the given width.
    pub fn integer(size: IntegerSize) -> Self {
        Self::Integer(IntegerConfig { size: Some(size) })
    }

    /// Fixed-length string of `max_size` characters.
    pub fn char(max_size: u64) -> Self {
        Self::Char(SizeConfig { max_size })
    }

    /// Variable-length string of `max_size` characters.
    pub fn varchar(max_size: u64) -> Self {
        Self::Varchar(SizeConfig { max_size })
    }

    /// Text of at most `max_size` characters.
    pub fn text(max_size: u64) -> Self {
        Self::Text(SizeConfig { max_size })
    }

    /// Binary file of at most `max_size` bytes.
    pub fn binary_file(max_size: u64) -> Self {
        Self::File(FileConfig {
            storage: StorageMode::Binary,
            max_size,
        })
    }

    /// Upper-case tag of the variant, as used in serialized models.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uuid => "UUID",
            Self::Integer(_) => "INTEGER",
            Self::Float => "FLOAT",
            Self::Decimal => "DECIMAL",
            Self::Boolean => "BOOLEAN",
            Self::Char(_) => "CHAR",
            Self::Varchar(_) => "VARCHAR",
            Self::Text(_) => "TEXT",
            Self::Encrypted(_) => "ENCRYPTED",
            Self::Email => "EMAIL",
            Self::Url => "URL",
            Self::Phone => "PHONE",
            Self::Color => "COLOR",
            Self::Location => "LOCATION",
            Self::Slug => "SLUG",
            Self::RichText => "RICHTEXT",
            Self::Code => "CODE",
            Self::Markdown => "MARKDOWN",
            Self::File(_) => "FILE",
            Self::Image(_) => "IMAGE",
            Self::Audio(_) => "AUDIO",
            Self::Video(_) => "VIDEO",
            Self::Enum(_) => "ENUM",
            Self::Json => "JSON",
            Self::Array => "ARRAY",
            Self::Date => "DATE",
            Self::DateTime => "DATETIME",
            Self::Time => "TIME",
            Self::Invalid => "INVALID",
        }
    }

    /// Check if the type could not be mapped.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }

    /// Check if the type is a calendar date or timestamp.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }

    /// Check if indexes over this type need a prefix length on MySQL.
    pub fn needs_index_prefix(&self) -> bool {
        matches!(
            self,
            Self::Text(_)
                | Self::RichText
                | Self::Code
                | Self::Markdown
                | Self::File(FileConfig {
                    storage: StorageMode::Binary,
                    ..
                })
        )
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_name() {
        assert_eq!(FieldType::Uuid.name(), "UUID");
        assert_eq!(FieldType::integer(IntegerSize::SixtyFour).name(), "INTEGER");
        assert_eq!(FieldType::DateTime.to_string(), "DATETIME");
    }

    #[test]
    fn test_field_type_serde() {
        let json = serde_json::to_value(FieldType::varchar(120)).unwrap();
        assert_eq!(json["type"], "VARCHAR");
        assert_eq!(json["config"]["max_size"], 120);

        let json = serde_json::to_value(FieldType::integer(IntegerSize::Sixteen)).unwrap();
        assert_eq!(json["config"]["size"], "16");

        let parsed: FieldType = serde_json::from_str(r#"{"type":"DATETIME"}"#).unwrap();
        assert_eq!(parsed, FieldType::DateTime);
    }

    #[test]
    fn test_needs_index_prefix() {
        assert!(FieldType::text(0).needs_index_prefix());
        assert!(FieldType::binary_file(0).needs_index_prefix());
        assert!(!FieldType::varchar(255).needs_index_prefix());
        assert!(
            !FieldType::File(FileConfig {
                storage: StorageMode::ObjectStore,
                max_size: 0
            })
            .needs_index_prefix()
        );
    }

    #[test]
    fn test_is_temporal() {
        assert!(FieldType::Date.is_temporal());
        assert!(FieldType::DateTime.is_temporal());
        assert!(!FieldType::Time.is_temporal());
    }

    #[test]
    fn test_integer_bits() {
        assert_eq!(IntegerSize::TwentyFour.bits(), 24);
    }
}
