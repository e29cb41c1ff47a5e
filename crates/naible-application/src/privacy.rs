//! Data privacy: export and deletion of everything stored about the user.

use naible_core::Result;
use naible_core::storage::{PreferenceStore, StoredUserData};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv; charset=utf-8",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Json => "naible_data_export.json",
            Self::Csv => "naible_data_export.csv",
        }
    }
}

/// A rendered export, ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataExport {
    pub format: ExportFormat,
    pub body: String,
}

impl DataExport {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    pub fn file_name(&self) -> &'static str {
        self.format.file_name()
    }
}

#[derive(Clone)]
pub struct PrivacyService {
    store: PreferenceStore,
}

impl PrivacyService {
    pub fn new(store: PreferenceStore) -> Self {
        Self { store }
    }

    /// Renders the stored user, preferences and content.
    ///
    /// JSON carries every record; CSV carries the user row only.
    pub fn export(&self, format: ExportFormat) -> Result<DataExport> {
        let data = self.store.export_user_data()?;
        let body = match format {
            ExportFormat::Json => serde_json::to_string_pretty(&data)?,
            ExportFormat::Csv => render_csv(&data),
        };
        tracing::info!(format = %format, "[Privacy] Exported user data");
        Ok(DataExport { format, body })
    }

    /// Deletes the user, preferences and generated content.
    pub fn delete_all(&self) -> Result<()> {
        self.store.delete_user_data()?;
        tracing::info!("[Privacy] Deleted all user data");
        Ok(())
    }
}

fn render_csv(data: &StoredUserData) -> String {
    let mut csv = String::from("user_id,is_anonymous\n");
    if let Some(user) = &data.user {
        csv.push_str(&format!(
            "{},{}\n",
            csv_field(&user.id),
            user.is_anonymous
        ));
    }
    csv
}

/// Quotes `value` when it holds a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
