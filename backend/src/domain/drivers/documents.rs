//! Driver documents, their storage buckets and object paths.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::UserId;

/// Object storage bucket receiving driver uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageBucket {
    /// Portrait photos of applicants.
    DriverPhotos,
    /// Licences, cards, vehicle photos and records.
    DriverDocuments,
}

impl StorageBucket {
    /// Bucket name on the storage platform.
    pub fn name(self) -> &'static str {
        match self {
            Self::DriverPhotos => "driver-photos",
            Self::DriverDocuments => "driver-documents",
        }
    }
}

impl fmt::Display for StorageBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Document slot on the driver application form.
///
/// Variants are declared in upload order; the derived `Ord` follows it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    DriverPhoto,
    DrivingLicense,
    LeadershipLicense,
    DriverCard,
    CarFrontPhoto,
    CarBackPhoto,
    CriminalRecord,
}

/// Error returned when parsing an unknown document kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseDocumentKindError;

impl fmt::Display for ParseDocumentKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid driver document kind")
    }
}

impl std::error::Error for ParseDocumentKindError {}

impl DocumentKind {
    /// Every slot, in upload order.
    pub const ALL: [Self; 7] = [
        Self::DriverPhoto,
        Self::DrivingLicense,
        Self::LeadershipLicense,
        Self::DriverCard,
        Self::CarFrontPhoto,
        Self::CarBackPhoto,
        Self::CriminalRecord,
    ];

    /// Snake-case name used in object paths.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DriverPhoto => "driver_photo",
            Self::DrivingLicense => "driving_license",
            Self::LeadershipLicense => "leadership_license",
            Self::DriverCard => "driver_card",
            Self::CarFrontPhoto => "car_front_photo",
            Self::CarBackPhoto => "car_back_photo",
            Self::CriminalRecord => "criminal_record",
        }
    }

    /// Camel-case form field carrying the files.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::DriverPhoto => "driverPhoto",
            Self::DrivingLicense => "drivingLicense",
            Self::LeadershipLicense => "leadershipLicense",
            Self::DriverCard => "driverCard",
            Self::CarFrontPhoto => "carFrontPhoto",
            Self::CarBackPhoto => "carBackPhoto",
            Self::CriminalRecord => "criminalRecord",
        }
    }

    /// Catalogue key for the slot label.
    pub fn label_key(self) -> &'static str {
        match self {
            Self::DriverPhoto => "driver.driverPhoto",
            Self::DrivingLicense => "driver.drivingLicense",
            Self::LeadershipLicense => "driver.leadershipLicense",
            Self::DriverCard => "driver.driverCard",
            Self::CarFrontPhoto => "driver.carFront",
            Self::CarBackPhoto => "driver.carBack",
            Self::CriminalRecord => "driver.criminalRecord",
        }
    }

    /// Whether an application without this slot is rejected.
    pub fn is_required(self) -> bool {
        !matches!(self, Self::CriminalRecord)
    }

    /// Whether the slot accepts several files.
    pub fn accepts_multiple(self) -> bool {
        !matches!(self, Self::DriverPhoto)
    }

    /// Bucket the slot's files are stored in.
    pub fn bucket(self) -> StorageBucket {
        match self {
            Self::DriverPhoto => StorageBucket::DriverPhotos,
            _ => StorageBucket::DriverDocuments,
        }
    }

    /// Object name (without extension) for the file at `index`.
    ///
    /// The photo slot holds a single file named after the slot; other slots
    /// suffix the zero-based position of the file.
    ///
    /// # Examples
    /// ```
    /// use smartline::domain::DocumentKind;
    ///
    /// assert_eq!(DocumentKind::DriverPhoto.object_name(0), "driver_photo");
    /// assert_eq!(DocumentKind::DriverCard.object_name(2), "driver_card_2");
    /// ```
    pub fn object_name(self, index: usize) -> String {
        if self.accepts_multiple() {
            format!("{}_{index}", self.as_str())
        } else {
            self.as_str().to_owned()
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = ParseDocumentKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or(ParseDocumentKindError)
    }
}

/// Extension taken from an uploaded file name.
///
/// Everything after the last `.`; a name without a dot is returned whole.
pub fn file_extension(file_name: &str) -> &str {
    file_name.rsplit('.').next().unwrap_or(file_name)
}

/// Object path `{user_id}/{object_name}.{ext}` inside the slot's bucket.
///
/// # Examples
/// ```
/// use smartline::domain::{storage_path, DocumentKind, UserId};
///
/// let user = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
/// assert_eq!(
///     storage_path(user, DocumentKind::CarBackPhoto, 1, "rear.view.JPG"),
///     "3fa85f64-5717-4562-b3fc-2c963f66afa6/car_back_photo_1.JPG",
/// );
/// ```
pub fn storage_path(user_id: UserId, kind: DocumentKind, index: usize, file_name: &str) -> String {
    format!(
        "{user_id}/{}.{}",
        kind.object_name(index),
        file_extension(file_name)
    )
}

/// A file the applicant attached to a slot.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Images of any kind and PDF documents are accepted.
    pub fn has_accepted_content_type(&self) -> bool {
        let essence = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        essence == "application/pdf"
            || essence
                .strip_prefix("image/")
                .is_some_and(|subtype| !subtype.is_empty())
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// URL of a stored document, recorded on the application row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub kind: DocumentKind,
    #[schema(example = "https://example.supabase.co/storage/v1/object/public/driver-documents/3fa85f64-5717-4562-b3fc-2c963f66afa6/driver_card_0.pdf")]
    pub url: String,
}
