//! Localized text of the form controller

use crate::domain::{Field, FieldViolation};
use serde::{Deserialize, Serialize};

/// Interface language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
}

/// Fixed notification texts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    ValidationFailed,
    SendSucceeded,
    SendFailed,
    NetworkError,
    Timeout,
}

impl Language {
    pub fn text(self, key: MessageKey) -> &'static str {
        use Language::*;
        use MessageKey::*;

        match (self, key) {
            (Fr, ValidationFailed) => "Veuillez corriger les erreurs du formulaire.",
            (En, ValidationFailed) => "Please fix the errors in the form.",
            (Fr, SendSucceeded) => "Message envoyé avec succès ! Je vous répondrai rapidement.",
            (En, SendSucceeded) => "Message sent successfully! I will get back to you soon.",
            (Fr, SendFailed) => "Une erreur est survenue lors de l'envoi. Veuillez réessayer.",
            (En, SendFailed) => "Something went wrong while sending. Please try again.",
            (Fr, NetworkError) => "Erreur réseau. Vérifiez votre connexion et réessayez.",
            (En, NetworkError) => "Network error. Check your connection and try again.",
            (Fr, Timeout) => "Le serveur met trop de temps à répondre. Veuillez réessayer.",
            (En, Timeout) => "The server took too long to respond. Please try again.",
        }
    }

    pub fn field_label(self, field: Field) -> &'static str {
        match (self, field) {
            (Language::Fr, Field::Name) => "Le nom",
            (Language::Fr, Field::Email) => "L'adresse e-mail",
            (Language::Fr, Field::Message) => "Le message",
            (Language::En, Field::Name) => "Name",
            (Language::En, Field::Email) => "Email address",
            (Language::En, Field::Message) => "Message",
        }
    }

    /// Error shown under a field
    pub fn violation(self, field: Field, violation: FieldViolation) -> String {
        let label = self.field_label(field);
        match (self, violation) {
            (Language::Fr, FieldViolation::Missing) => format!("{label} est requis"),
            (Language::Fr, FieldViolation::TooShort { min }) => {
                format!("{label} doit contenir au moins {min} caractères")
            }
            (Language::Fr, FieldViolation::TooLong { max }) => {
                format!("{label} doit contenir au plus {max} caractères")
            }
            (Language::Fr, FieldViolation::InvalidFormat) => {
                format!("{label} n'est pas valide")
            }
            (Language::En, violation) => format!("{label} {violation}"),
        }
    }
}
