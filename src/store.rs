//! Record store
//!
//! Reports and leads are written once and never updated. Two backends:
//! - `MemoryStore`: process-local maps, used by tests and local runs
//! - `SupabaseStore`: hosted Postgres reached through its PostgREST API
//!
//! No retries. A failed call surfaces as `StoreError` and the handler turns
//! it into a generic 500.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rustc_hash::FxHashMap;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::StoreError;
use crate::records::{LeadRecord, NewLead, NewReport, ReportRecord};

const REPORTS_TABLE: &str = "reports";
const LEADS_TABLE: &str = "leads";

pub enum RecordStore {
    Memory(MemoryStore),
    Supabase(SupabaseStore),
}

impl RecordStore {
    pub fn backend_name(&self) -> &'static str {
        match self {
            RecordStore::Memory(_) => "memory",
            RecordStore::Supabase(_) => "supabase",
        }
    }

    pub async fn insert_report(&self, report: NewReport) -> Result<ReportRecord, StoreError> {
        match self {
            RecordStore::Memory(store) => Ok(store.insert_report(report)),
            RecordStore::Supabase(store) => store.insert(REPORTS_TABLE, &report).await,
        }
    }

    pub async fn get_report(&self, id: &str) -> Result<ReportRecord, StoreError> {
        match self {
            RecordStore::Memory(store) => store
                .get_report(id)
                .ok_or_else(|| StoreError::NotFound(id.to_string())),
            RecordStore::Supabase(store) => store.select_by_id(REPORTS_TABLE, id).await,
        }
    }

    pub async fn insert_lead(&self, lead: NewLead) -> Result<LeadRecord, StoreError> {
        match self {
            RecordStore::Memory(store) => Ok(store.insert_lead(lead)),
            RecordStore::Supabase(store) => store.insert(LEADS_TABLE, &lead).await,
        }
    }
}

// ============================================================================
// In-memory backend
// ============================================================================

/// Process-local backend for tests and local runs.
///
/// Records are never evicted, so memory grows with every write. Not meant
/// for long-running servers; configure `SUPABASE_URL` there.
#[derive(Default)]
pub struct MemoryStore {
    reports: Mutex<FxHashMap<String, ReportRecord>>,
    leads: Mutex<Vec<LeadRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_report(&self, report: NewReport) -> ReportRecord {
        let record = ReportRecord {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            report,
        };
        lock(&self.reports).insert(record.id.clone(), record.clone());
        record
    }

    pub fn get_report(&self, id: &str) -> Option<ReportRecord> {
        lock(&self.reports).get(id.trim()).cloned()
    }

    pub fn insert_lead(&self, lead: NewLead) -> LeadRecord {
        let record = LeadRecord {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            lead,
        };
        lock(&self.leads).push(record.clone());
        record
    }

    pub fn report_count(&self) -> usize {
        lock(&self.reports).len()
    }

    pub fn lead_count(&self) -> usize {
        lock(&self.leads).len()
    }

    pub fn leads(&self) -> Vec<LeadRecord> {
        lock(&self.leads).clone()
    }
}

// A panic while holding the lock cannot leave a half-written record
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ============================================================================
// PostgREST backend
// ============================================================================

pub struct SupabaseStore {
    client: reqwest::Client,
    rest_url: String,
    api_key: String,
}

impl SupabaseStore {
    pub fn new(project_url: &str, api_key: &str) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("effluentic/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StoreError::Http(e.to_string()))?;

        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", project_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Insert one row and return it as stored (with generated id/timestamp)
    async fn insert<T, R>(&self, table: &str, row: &T) -> Result<R, StoreError>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let request = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(row);

        let rows: Vec<R> = self.send(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode(format!("insert into {} returned no rows", table)))
    }

    async fn select_by_id<R: DeserializeOwned>(&self, table: &str, id: &str) -> Result<R, StoreError> {
        let request = self
            .client
            .get(self.table_url(table))
            .query(&[("id", format!("eq.{}", id.trim())), ("select", "*".to_string())]);

        let rows: Vec<R> = self.send(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn send<R: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<R, StoreError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}
