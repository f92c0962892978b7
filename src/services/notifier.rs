// src/services/notifier.rs
//
// Notifier - turns events into short localized messages for the admin
//
// The notifier only observes the event bus. Screens never call it directly.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use crate::domain::{Table, DISPLAY_ID_COLUMN};
use crate::error::{AppError, FailureKind};
use crate::events::{
    EventBus, FileUploaded, Operation, OperationFailed, RecordCreated, RecordDeleted,
    RecordUpdated,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    De,
}

impl FromStr for Locale {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            "de" | "de-de" | "de-at" | "de-ch" => Ok(Locale::De),
            other => Err(AppError::Validation(format!("Unsupported locale '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

pub struct Notifier {
    queue: Arc<Mutex<Vec<Notification>>>,
}

impl Notifier {
    /// Subscribe to the bus and start collecting notifications.
    pub fn attach(event_bus: &EventBus, locale: Locale) -> Self {
        let queue: Arc<Mutex<Vec<Notification>>> = Arc::new(Mutex::new(Vec::new()));

        let q = Arc::clone(&queue);
        event_bus.subscribe::<RecordCreated, _>(move |event| {
            push(&q, NotificationLevel::Success, created_message(locale, event));
        });

        let q = Arc::clone(&queue);
        event_bus.subscribe::<RecordUpdated, _>(move |event| {
            let message = match locale {
                Locale::En => format!("Changes to {} saved", table_label(locale, event.table)),
                Locale::De => format!(
                    "Änderungen an {} gespeichert",
                    table_label(locale, event.table)
                ),
            };
            push(&q, NotificationLevel::Success, message);
        });

        let q = Arc::clone(&queue);
        event_bus.subscribe::<RecordDeleted, _>(move |event| {
            let message = match locale {
                Locale::En => format!("Entry deleted from {}", table_label(locale, event.table)),
                Locale::De => format!("Eintrag aus {} gelöscht", table_label(locale, event.table)),
            };
            push(&q, NotificationLevel::Success, message);
        });

        let q = Arc::clone(&queue);
        event_bus.subscribe::<FileUploaded, _>(move |_| {
            let message = match locale {
                Locale::En => "Image uploaded",
                Locale::De => "Bild hochgeladen",
            };
            push(&q, NotificationLevel::Success, message.to_string());
        });

        let q = Arc::clone(&queue);
        event_bus.subscribe::<OperationFailed, _>(move |event| {
            push(&q, NotificationLevel::Error, failure_message(locale, event));
        });

        Self { queue }
    }

    /// Pending notifications, oldest first. The queue is emptied.
    pub fn drain(&self) -> Vec<Notification> {
        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *queue)
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

fn push(queue: &Mutex<Vec<Notification>>, level: NotificationLevel, message: String) {
    queue
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .push(Notification { level, message });
}

fn created_message(locale: Locale, event: &RecordCreated) -> String {
    let is_product_number = event.table.sequence_column() == Some(DISPLAY_ID_COLUMN);
    match (locale, event.sequence_value) {
        (Locale::En, Some(n)) if is_product_number => format!("Product #{} created", n),
        (Locale::De, Some(n)) if is_product_number => format!("Produkt #{} angelegt", n),
        (Locale::En, _) => format!("Entry added to {}", table_label(locale, event.table)),
        (Locale::De, _) => format!("Eintrag in {} angelegt", table_label(locale, event.table)),
    }
}

fn failure_message(locale: Locale, event: &OperationFailed) -> String {
    if event.kind == FailureKind::ValidationFailure {
        return match locale {
            Locale::En => format!("Please check your input: {}", event.message),
            Locale::De => format!("Bitte Eingaben prüfen: {}", event.message),
        };
    }

    let target = event
        .table
        .map(|t| table_label(locale, t))
        .unwrap_or(match locale {
            Locale::En => "file",
            Locale::De => "Datei",
        });

    match locale {
        Locale::En => format!(
            "Could not {} {}: {}",
            operation_verb(event.operation),
            target,
            event.message
        ),
        Locale::De => format!(
            "{} fehlgeschlagen ({}): {}",
            operation_noun_de(event.operation),
            target,
            event.message
        ),
    }
}

fn operation_verb(operation: Operation) -> &'static str {
    match operation {
        Operation::Load => "load",
        Operation::Create => "create entry in",
        Operation::Update => "save",
        Operation::Delete => "delete from",
        Operation::Upload => "upload",
    }
}

fn operation_noun_de(operation: Operation) -> &'static str {
    match operation {
        Operation::Load => "Laden",
        Operation::Create => "Anlegen",
        Operation::Update => "Speichern",
        Operation::Delete => "Löschen",
        Operation::Upload => "Hochladen",
    }
}

/// Screen name of a table as shown to the admin.
pub fn table_label(locale: Locale, table: Table) -> &'static str {
    match (locale, table) {
        (Locale::En, Table::Products) => "products",
        (Locale::De, Table::Products) => "Produkte",
        (Locale::En, Table::BlogPosts) => "blog posts",
        (Locale::De, Table::BlogPosts) => "Blogbeiträge",
        (Locale::En, Table::BlogCategories) => "blog categories",
        (Locale::De, Table::BlogCategories) => "Blogkategorien",
        (Locale::En, Table::AboutSections) => "about sections",
        (Locale::De, Table::AboutSections) => "Über-uns-Abschnitte",
        (Locale::En, Table::AboutFeatures) => "about features",
        (Locale::De, Table::AboutFeatures) => "Über-uns-Merkmale",
        (Locale::En, Table::FooterContent) => "footer content",
        (Locale::De, Table::FooterContent) => "Footer-Inhalt",
        (Locale::En, Table::FooterLinks) => "footer links",
        (Locale::De, Table::FooterLinks) => "Footer-Links",
        (Locale::En, Table::HomepageContent) => "homepage content",
        (Locale::De, Table::HomepageContent) => "Startseiteninhalt",
        (Locale::En, Table::DesignOptions) => "design options",
        (Locale::De, Table::DesignOptions) => "Designoptionen",
        (Locale::En, Table::DesignTemplates) => "design templates",
        (Locale::De, Table::DesignTemplates) => "Designvorlagen",
        (Locale::En, Table::StoryRings) => "story rings",
        (Locale::De, Table::StoryRings) => "Story-Ringe",
        (Locale::En, Table::Translations) => "translations",
        (Locale::De, Table::Translations) => "Übersetzungen",
        (Locale::En, Table::SeoSettings) => "SEO settings",
        (Locale::De, Table::SeoSettings) => "SEO-Einstellungen",
        (Locale::En, Table::ContactMessages) => "messages",
        (Locale::De, Table::ContactMessages) => "Nachrichten",
        (Locale::En, Table::GallerySettings) => "gallery settings",
        (Locale::De, Table::GallerySettings) => "Galerie-Einstellungen",
        (Locale::En, Table::JerseyTypes) => "jersey types",
        (Locale::De, Table::JerseyTypes) => "Trikottypen",
        (Locale::En, Table::PriceRanges) => "price ranges",
        (Locale::De, Table::PriceRanges) => "Preisspannen",
        (Locale::En, Table::OrderQuantities) => "order quantities",
        (Locale::De, Table::OrderQuantities) => "Bestellmengen",
        (Locale::En, Table::JerseyColors) => "jersey colors",
        (Locale::De, Table::JerseyColors) => "Trikotfarben",
        (Locale::En, Table::SiteSettings) => "site settings",
        (Locale::De, Table::SiteSettings) => "Website-Einstellungen",
    }
}
