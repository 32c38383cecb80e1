//! Localised page models for the marketing site and the auth page.
//!
//! Pages are composed from catalogue copy only; the browser shell decides
//! how to paint them. Each section resolves every catalogue key under its
//! prefixes, so adding copy to the catalogues surfaces it without code
//! changes.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Catalogue, DocumentKind, Language, TextDirection};

/// Referral code shared by every visitor.
pub const REFERRAL_CODE: &str = "SMARTLINE250";

/// Home page sections in render order, with the catalogue prefixes each one
/// draws from.
const HOME_SECTIONS: [(SectionId, &[&str]); 10] = [
    (SectionId::Header, &["nav"]),
    (SectionId::Hero, &["hero", "go", "recent", "drive"]),
    (SectionId::About, &["about"]),
    (SectionId::Download, &["download", "apps"]),
    (SectionId::Promotions, &["promo"]),
    (SectionId::Referral, &["referral"]),
    (SectionId::Testimonials, &["testimonials"]),
    (SectionId::Contact, &["contact"]),
    (SectionId::Feedback, &["feedback"]),
    (SectionId::Footer, &["footer"]),
];

/// Identifier of a home page section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Header,
    Hero,
    About,
    Download,
    Promotions,
    Referral,
    Testimonials,
    Contact,
    Feedback,
    Footer,
}

/// One block of the home page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,
    /// Resolved copy keyed by catalogue id.
    pub texts: BTreeMap<String, String>,
    /// Non-copy values the section displays, such as the referral code.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

/// Localised home page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub language: Language,
    pub direction: TextDirection,
    pub sections: Vec<Section>,
}

/// Compose the home page in `language`.
///
/// # Examples
/// ```
/// use smartline::domain::{home_page, Catalogue, Language, SectionId};
///
/// let catalogue = Catalogue::bundled().unwrap();
/// let page = home_page(&catalogue, Language::En);
/// assert_eq!(page.sections.first().map(|s| s.id), Some(SectionId::Header));
/// assert_eq!(page.sections.last().map(|s| s.id), Some(SectionId::Footer));
/// ```
pub fn home_page(catalogue: &Catalogue, language: Language) -> HomePage {
    let sections = HOME_SECTIONS
        .iter()
        .map(|(id, prefixes)| {
            let mut attributes = BTreeMap::new();
            if *id == SectionId::Referral {
                attributes.insert("code".to_owned(), REFERRAL_CODE.to_owned());
            }
            Section {
                id: *id,
                texts: resolve_prefixes(catalogue, language, prefixes),
                attributes,
            }
        })
        .collect();
    HomePage {
        language,
        direction: language.direction(),
        sections,
    }
}

fn resolve_prefixes(
    catalogue: &Catalogue,
    language: Language,
    prefixes: &[&str],
) -> BTreeMap<String, String> {
    // English is the reference key set; Arabic gaps fall back to the key.
    catalogue
        .messages(Language::En)
        .keys()
        .filter(|key| {
            prefixes.iter().any(|prefix| {
                key.strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('.'))
            })
        })
        .map(|key| (key.clone(), catalogue.translate(language, key).to_owned()))
        .collect()
}

/// Which form the auth page shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    Login,
    #[default]
    Signup,
}

impl FromStr for AuthMode {
    type Err = std::convert::Infallible;

    /// Unknown modes fall back to sign-up.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "login" => Self::Login,
            _ => Self::Signup,
        })
    }
}

/// Account type chosen on the sign-up form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SignupRole {
    Passenger,
    Driver,
}

impl SignupRole {
    pub const ALL: [Self; 2] = [Self::Passenger, Self::Driver];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passenger => "passenger",
            Self::Driver => "driver",
        }
    }

    fn label_key(self) -> &'static str {
        match self {
            Self::Passenger => "auth.role.passenger",
            Self::Driver => "auth.role.driver",
        }
    }
}

/// Input a form renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub input: InputKind,
    pub required: bool,
}

/// Rendering hint for a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Email,
    Tel,
    Password,
    Select,
    File,
    MultiFile,
}

/// Selectable option of a choice field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

/// Localised auth page for one mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthPage {
    pub language: Language,
    pub direction: TextDirection,
    pub mode: AuthMode,
    pub title: String,
    pub description: String,
    pub submit_label: String,
    pub fields: Vec<FormField>,
    /// Account types offered on sign-up; empty when logging in.
    pub roles: Vec<ChoiceOption>,
    /// Driver application form, offered on sign-up only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_form: Option<DriverFormModel>,
}

/// Localised driver application form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriverFormModel {
    pub title: String,
    pub fields: Vec<FormField>,
    pub identity_types: Vec<ChoiceOption>,
    pub documents: Vec<FormField>,
    pub submit_label: String,
}

struct FieldCopy<'a> {
    name: &'a str,
    label: &'a str,
    placeholder: Option<&'a str>,
    input: InputKind,
    required: bool,
}

const fn copy<'a>(name: &'a str, label: &'a str, input: InputKind) -> FieldCopy<'a> {
    FieldCopy {
        name,
        label,
        placeholder: None,
        input,
        required: true,
    }
}

fn render_fields(catalogue: &Catalogue, language: Language, fields: &[FieldCopy<'_>]) -> Vec<FormField> {
    fields
        .iter()
        .map(|field| FormField {
            name: field.name.to_owned(),
            label: catalogue.translate(language, field.label).to_owned(),
            placeholder: field
                .placeholder
                .map(|key| catalogue.translate(language, key).to_owned()),
            input: field.input,
            required: field.required,
        })
        .collect()
}

/// Compose the auth page in `language` for `mode`.
pub fn auth_page(catalogue: &Catalogue, language: Language, mode: AuthMode) -> AuthPage {
    let t = |key: &str| catalogue.translate(language, key).to_owned();
    let email = FieldCopy {
        placeholder: Some("auth.email.placeholder"),
        ..copy("email", "auth.email", InputKind::Email)
    };
    let password = FieldCopy {
        placeholder: Some("auth.password.placeholder"),
        ..copy("password", "auth.password", InputKind::Password)
    };

    match mode {
        AuthMode::Login => AuthPage {
            language,
            direction: language.direction(),
            mode,
            title: t("auth.welcome.back"),
            description: t("auth.signin.description"),
            submit_label: t("auth.signin.button"),
            fields: render_fields(catalogue, language, &[email, password]),
            roles: Vec::new(),
            driver_form: None,
        },
        AuthMode::Signup => {
            let full_name = FieldCopy {
                placeholder: Some("auth.fullname.placeholder"),
                ..copy("fullName", "auth.fullname", InputKind::Text)
            };
            AuthPage {
                language,
                direction: language.direction(),
                mode,
                title: t("auth.get.started"),
                description: t("auth.signup.description"),
                submit_label: t("auth.signup.button"),
                fields: render_fields(catalogue, language, &[full_name, email, password]),
                roles: SignupRole::ALL
                    .into_iter()
                    .map(|role| ChoiceOption {
                        value: role.as_str().to_owned(),
                        label: t(role.label_key()),
                    })
                    .collect(),
                driver_form: Some(driver_form(catalogue, language)),
            }
        }
    }
}

fn driver_form(catalogue: &Catalogue, language: Language) -> DriverFormModel {
    let t = |key: &str| catalogue.translate(language, key).to_owned();
    let fields = [
        copy("firstName", "driver.firstName", InputKind::Text),
        copy("lastName", "driver.lastName", InputKind::Text),
        copy("email", "driver.email", InputKind::Email),
        copy("phone", "driver.phone", InputKind::Tel),
        FieldCopy {
            placeholder: Some("driver.selectIdType"),
            ..copy("identityType", "driver.idType", InputKind::Select)
        },
        copy("identityNumber", "driver.idNumber", InputKind::Text),
        copy("password", "driver.password", InputKind::Password),
        copy(
            "passwordConfirmation",
            "driver.confirmPassword",
            InputKind::Password,
        ),
    ];
    let documents: Vec<_> = DocumentKind::ALL
        .into_iter()
        .map(|kind| FieldCopy {
            name: kind.field_name(),
            label: kind.label_key(),
            placeholder: Some("driver.chooseFile"),
            input: if kind.accepts_multiple() {
                InputKind::MultiFile
            } else {
                InputKind::File
            },
            required: kind.is_required(),
        })
        .collect();

    DriverFormModel {
        title: t("driver.title"),
        fields: render_fields(catalogue, language, &fields),
        identity_types: [
            ("national_id", "driver.nationalId"),
            ("passport", "driver.passport"),
            ("driver_license", "driver.driverLicense"),
        ]
        .into_iter()
        .map(|(value, label)| ChoiceOption {
            value: value.to_owned(),
            label: t(label),
        })
        .collect(),
        documents: render_fields(catalogue, language, &documents),
        submit_label: t("driver.submit"),
    }
}
