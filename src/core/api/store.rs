use tokio::sync::RwLock;

use super::flag::AuditFlag;
use super::metrics::DashboardMetrics;
use super::project::Project;
use super::report::AuditReport;
use super::task::AuditTask;

/// A record addressable by its unique id within a collection.
pub(super) trait Keyed: Clone {
    fn key(&self) -> &str;
}

impl Keyed for Project {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for AuditFlag {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for AuditTask {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for AuditReport {
    fn key(&self) -> &str {
        &self.id
    }
}

/// One fixture collection. `Vec`-backed so `list` preserves seed order,
/// which downstream sorting and the stability guarantees depend on.
pub(super) struct Collection<T> {
    items: RwLock<Vec<T>>,
}

impl<T: Keyed> Collection<T> {
    pub(super) fn new(items: Vec<T>) -> Self {
        Collection {
            items: RwLock::new(items),
        }
    }

    pub(super) async fn list(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    pub(super) async fn get(&self, id: &str) -> Option<T> {
        self.items
            .read()
            .await
            .iter()
            .find(|record| record.key() == id)
            .cloned()
    }

    /// Swap in an edited copy of an existing record. The write is a single
    /// assignment, so readers never observe a partially applied update.
    /// Returns false when no record carries the given key.
    pub(super) async fn replace(&self, record: T) -> bool {
        let mut items = self.items.write().await;
        match items.iter().position(|existing| existing.key() == record.key()) {
            Some(position) => {
                items[position] = record;
                true
            }
            None => false,
        }
    }
}

/// Process-wide fixture data. Seeded once at construction; there is no
/// deletion path, and the metrics snapshot is immutable.
pub(super) struct Store {
    pub(super) projects: Collection<Project>,
    pub(super) flags: Collection<AuditFlag>,
    pub(super) tasks: Collection<AuditTask>,
    pub(super) reports: Collection<AuditReport>,
    pub(super) metrics: DashboardMetrics,
}

impl Store {
    pub(super) fn seeded() -> Self {
        Store {
            projects: Collection::new(super::project::seed_projects()),
            flags: Collection::new(super::flag::seed_flags()),
            tasks: Collection::new(super::task::seed_tasks()),
            reports: Collection::new(super::report::seed_reports()),
            metrics: super::metrics::seed_metrics(),
        }
    }
}
