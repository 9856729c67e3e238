//! Domain managers
//!
//! Stateless façades over the tracker client, one per queue. Each manager
//! only translates between its record type and the generic issue shape;
//! validation beyond absent-field defaulting does not happen here.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::Result;
use crate::records::{
    CityRecord, CompanyRecord, EmployeeRecord, RequestRecord, ShiftRecord, WarehouseRecord,
};
use crate::roles::EmployeeLookup;
use crate::tracker::{queues, IssueApi, IssueUpdate, NewIssue};

const ISSUE_TYPE: &str = "task";

fn queue_query(queue: &str, criteria: &str) -> String {
    if criteria.is_empty() {
        format!("Queue: {}", queue)
    } else {
        format!("Queue: {} {}", queue, criteria)
    }
}

/// Employee cards in the `EMP` queue.
#[derive(Clone)]
pub struct EmployeeManager {
    api: Arc<dyn IssueApi>,
}

impl EmployeeManager {
    pub fn new(api: Arc<dyn IssueApi>) -> Self {
        Self { api }
    }

    pub async fn create(&self, record: &EmployeeRecord) -> Result<String> {
        let issue = self
            .api
            .create_issue(NewIssue {
                queue: queues::EMPLOYEES.to_string(),
                summary: record.summary(),
                description: "Карточка сотрудника".to_string(),
                issue_type: ISSUE_TYPE.to_string(),
                custom_fields: record.to_custom_fields(),
            })
            .await?;
        Ok(issue.key)
    }

    pub async fn get(&self, key: &str) -> Result<EmployeeRecord> {
        Ok(EmployeeRecord::from_issue(&self.api.get_issue(key).await?))
    }

    pub async fn update(&self, key: &str, record: &EmployeeRecord) -> Result<EmployeeRecord> {
        let issue = self
            .api
            .update_issue(
                key,
                IssueUpdate {
                    summary: Some(record.summary()),
                    custom_fields: record.to_custom_fields(),
                },
            )
            .await?;
        Ok(EmployeeRecord::from_issue(&issue))
    }

    /// List employees matching the criteria, with their issue keys.
    pub async fn search(&self, criteria: &str) -> Result<Vec<(String, EmployeeRecord)>> {
        let issues = self
            .api
            .search_issues(&queue_query(queues::EMPLOYEES, criteria))
            .await?;
        Ok(issues
            .iter()
            .map(|issue| (issue.key.clone(), EmployeeRecord::from_issue(issue)))
            .collect())
    }
}

#[async_trait]
impl EmployeeLookup for EmployeeManager {
    async fn find_by_chat_id(&self, chat_id: &str) -> Result<Option<EmployeeRecord>> {
        let criteria = format!("\"Telegram\": \"{}\"", chat_id);
        let matches = self.search(&criteria).await?;
        Ok(matches
            .into_iter()
            .map(|(_, record)| record)
            .find(|record| record.telegram == chat_id))
    }
}

/// Company cards in the `COMP` queue.
#[derive(Clone)]
pub struct CompanyManager {
    api: Arc<dyn IssueApi>,
}

impl CompanyManager {
    pub fn new(api: Arc<dyn IssueApi>) -> Self {
        Self { api }
    }

    pub async fn create(&self, record: &CompanyRecord) -> Result<String> {
        let issue = self
            .api
            .create_issue(NewIssue {
                queue: queues::COMPANIES.to_string(),
                summary: record.summary(),
                description: "Карточка компании".to_string(),
                issue_type: ISSUE_TYPE.to_string(),
                custom_fields: record.to_custom_fields(),
            })
            .await?;
        Ok(issue.key)
    }

    pub async fn get(&self, key: &str) -> Result<CompanyRecord> {
        Ok(CompanyRecord::from_issue(&self.api.get_issue(key).await?))
    }

    pub async fn update(&self, key: &str, record: &CompanyRecord) -> Result<CompanyRecord> {
        let issue = self
            .api
            .update_issue(
                key,
                IssueUpdate {
                    summary: Some(record.summary()),
                    custom_fields: record.to_custom_fields(),
                },
            )
            .await?;
        Ok(CompanyRecord::from_issue(&issue))
    }
}

/// City reference records in the `CITY` queue.
#[derive(Clone)]
pub struct CityManager {
    api: Arc<dyn IssueApi>,
}

impl CityManager {
    pub fn new(api: Arc<dyn IssueApi>) -> Self {
        Self { api }
    }

    pub async fn create(&self, record: &CityRecord) -> Result<String> {
        let issue = self
            .api
            .create_issue(NewIssue {
                queue: queues::CITIES.to_string(),
                summary: record.summary(),
                description: "Карточка города".to_string(),
                issue_type: ISSUE_TYPE.to_string(),
                custom_fields: record.to_custom_fields(),
            })
            .await?;
        Ok(issue.key)
    }

    pub async fn get(&self, key: &str) -> Result<CityRecord> {
        Ok(CityRecord::from_issue(&self.api.get_issue(key).await?))
    }
}

/// Warehouse cards in the `WH` queue.
#[derive(Clone)]
pub struct WarehouseManager {
    api: Arc<dyn IssueApi>,
}

impl WarehouseManager {
    pub fn new(api: Arc<dyn IssueApi>) -> Self {
        Self { api }
    }

    pub async fn create(&self, record: &WarehouseRecord) -> Result<String> {
        let issue = self
            .api
            .create_issue(NewIssue {
                queue: queues::WAREHOUSES.to_string(),
                summary: record.summary(),
                description: "Карточка склада".to_string(),
                issue_type: ISSUE_TYPE.to_string(),
                custom_fields: record.to_custom_fields(),
            })
            .await?;
        Ok(issue.key)
    }

    pub async fn get(&self, key: &str) -> Result<WarehouseRecord> {
        Ok(WarehouseRecord::from_issue(&self.api.get_issue(key).await?))
    }
}

/// Shift cards in the `SHIFT` queue.
#[derive(Clone)]
pub struct ShiftManager {
    api: Arc<dyn IssueApi>,
}

impl ShiftManager {
    pub fn new(api: Arc<dyn IssueApi>) -> Self {
        Self { api }
    }

    pub async fn create(&self, record: &ShiftRecord) -> Result<String> {
        let issue = self
            .api
            .create_issue(NewIssue {
                queue: queues::SHIFTS.to_string(),
                summary: record.summary(),
                description: "Карточка смены".to_string(),
                issue_type: ISSUE_TYPE.to_string(),
                custom_fields: record.to_custom_fields(),
            })
            .await?;
        Ok(issue.key)
    }

    pub async fn get(&self, key: &str) -> Result<ShiftRecord> {
        Ok(ShiftRecord::from_issue(&self.api.get_issue(key).await?))
    }

    pub async fn search(&self, criteria: &str) -> Result<Vec<(String, ShiftRecord)>> {
        let issues = self
            .api
            .search_issues(&queue_query(queues::SHIFTS, criteria))
            .await?;
        Ok(issues
            .iter()
            .map(|issue| (issue.key.clone(), ShiftRecord::from_issue(issue)))
            .collect())
    }

    /// The employee's most recent shift that is still open, if any.
    pub async fn find_active(&self, employee: &str) -> Result<Option<(String, ShiftRecord)>> {
        let criteria = format!("\"Employee\": \"{}\" \"Status\": \"active\"", employee);
        let shifts = self.search(&criteria).await?;
        Ok(shifts
            .into_iter()
            .filter(|(_, shift)| shift.employee == employee && shift.status == "active")
            .last())
    }

    /// Close an open shift: stamp the end time and mark it completed.
    pub async fn close(&self, key: &str, end_time: &str) -> Result<ShiftRecord> {
        let mut fields = Map::new();
        fields.insert("endTime".into(), Value::String(end_time.to_string()));
        fields.insert("status".into(), Value::String("completed".to_string()));

        let issue = self
            .api
            .update_issue(
                key,
                IssueUpdate {
                    summary: None,
                    custom_fields: fields,
                },
            )
            .await?;
        Ok(ShiftRecord::from_issue(&issue))
    }

    pub async fn comment(&self, key: &str, text: &str) -> Result<()> {
        self.api.add_comment(key, text).await
    }
}

/// Staffing requests in the `REQ` queue.
#[derive(Clone)]
pub struct RequestManager {
    api: Arc<dyn IssueApi>,
}

impl RequestManager {
    pub fn new(api: Arc<dyn IssueApi>) -> Self {
        Self { api }
    }

    pub async fn create(&self, record: &RequestRecord) -> Result<String> {
        let mut fields = record.to_custom_fields();
        // A fresh request opens with every slot free.
        fields.insert(
            "availableSlots".into(),
            Value::from(record.required_employees),
        );

        let issue = self
            .api
            .create_issue(NewIssue {
                queue: queues::REQUESTS.to_string(),
                summary: record.summary(),
                description: record.description.clone(),
                issue_type: ISSUE_TYPE.to_string(),
                custom_fields: fields,
            })
            .await?;
        Ok(issue.key)
    }

    pub async fn get(&self, key: &str) -> Result<RequestRecord> {
        Ok(RequestRecord::from_issue(&self.api.get_issue(key).await?))
    }

    pub async fn search(&self, criteria: &str) -> Result<Vec<(String, RequestRecord)>> {
        let issues = self
            .api
            .search_issues(&queue_query(queues::REQUESTS, criteria))
            .await?;
        Ok(issues
            .iter()
            .map(|issue| (issue.key.clone(), RequestRecord::from_issue(issue)))
            .collect())
    }

    pub async fn update_slots(&self, key: &str, slots: u32) -> Result<RequestRecord> {
        let mut fields = Map::new();
        fields.insert("availableSlots".into(), Value::from(slots));

        let issue = self
            .api
            .update_issue(
                key,
                IssueUpdate {
                    summary: None,
                    custom_fields: fields,
                },
            )
            .await?;
        Ok(RequestRecord::from_issue(&issue))
    }

    /// Apply an employee to a request.
    ///
    /// Read-then-conditional-write: append the employee if absent and
    /// decrement the slot count, clamped at zero. A repeated call with the
    /// same employee is a no-op. The two steps are not transactional;
    /// concurrent callers against the same request can race.
    pub async fn add_employee_to_request(
        &self,
        key: &str,
        employee: &str,
    ) -> Result<RequestRecord> {
        let current = self.get(key).await?;
        if current.applied_employees.iter().any(|e| e == employee) {
            debug!("request {}: {} already applied", key, employee);
            return Ok(current);
        }

        let mut applied = current.applied_employees.clone();
        applied.push(employee.to_string());

        let mut fields = Map::new();
        fields.insert(
            "appliedEmployees".into(),
            Value::Array(applied.into_iter().map(Value::String).collect()),
        );
        fields.insert(
            "availableSlots".into(),
            Value::from(current.available_slots.saturating_sub(1)),
        );

        let issue = self
            .api
            .update_issue(
                key,
                IssueUpdate {
                    summary: None,
                    custom_fields: fields,
                },
            )
            .await?;
        Ok(RequestRecord::from_issue(&issue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::testing::FakeTracker;

    fn request_manager() -> (Arc<FakeTracker>, RequestManager) {
        let tracker = Arc::new(FakeTracker::new());
        let manager = RequestManager::new(tracker.clone());
        (tracker, manager)
    }

    #[tokio::test]
    async fn employee_create_get_round_trip() {
        let tracker = Arc::new(FakeTracker::new());
        let manager = EmployeeManager::new(tracker);

        let record = EmployeeRecord {
            last_name: "Иванов".into(),
            first_name: "Иван".into(),
            telegram: "100500".into(),
            ..EmployeeRecord::default()
        };
        let key = manager.create(&record).await.unwrap();
        assert_eq!(key, "EMP-1");

        let loaded = manager.get(&key).await.unwrap();
        assert_eq!(loaded.last_name, "Иванов");
        assert_eq!(loaded.role, "employee");
    }

    #[tokio::test]
    async fn find_by_chat_id_matches_telegram_field() {
        let tracker = Arc::new(FakeTracker::new());
        let manager = EmployeeManager::new(tracker);

        let record = EmployeeRecord {
            last_name: "Петров".into(),
            telegram: "42".into(),
            role: "brigadier".into(),
            ..EmployeeRecord::default()
        };
        manager.create(&record).await.unwrap();

        let found = manager.find_by_chat_id("42").await.unwrap();
        assert_eq!(found.unwrap().role, "brigadier");

        let missing = manager.find_by_chat_id("43").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn new_request_opens_with_all_slots_free() {
        let (_tracker, manager) = request_manager();

        let record = RequestRecord {
            title: "Заявка на склад".into(),
            required_employees: 5,
            // ignored on create: slots always start at required
            available_slots: 1,
            ..RequestRecord::default()
        };
        let key = manager.create(&record).await.unwrap();

        let loaded = manager.get(&key).await.unwrap();
        assert_eq!(loaded.available_slots, 5);
        assert!(loaded.applied_employees.is_empty());
    }

    #[tokio::test]
    async fn add_employee_appends_and_decrements_once() {
        let (_tracker, manager) = request_manager();
        let key = manager
            .create(&RequestRecord {
                title: "Заявка".into(),
                required_employees: 5,
                ..RequestRecord::default()
            })
            .await
            .unwrap();

        let updated = manager.add_employee_to_request(&key, "E1").await.unwrap();
        assert_eq!(updated.applied_employees, vec!["E1".to_string()]);
        assert_eq!(updated.available_slots, 4);

        // Repeated add with the same employee is a no-op.
        let repeated = manager.add_employee_to_request(&key, "E1").await.unwrap();
        assert_eq!(repeated.applied_employees.len(), 1);
        assert_eq!(repeated.available_slots, 4);
    }

    #[tokio::test]
    async fn slots_never_go_negative() {
        let (_tracker, manager) = request_manager();
        let key = manager
            .create(&RequestRecord {
                title: "Заявка".into(),
                required_employees: 1,
                ..RequestRecord::default()
            })
            .await
            .unwrap();

        for employee in ["E1", "E2", "E3"] {
            manager
                .add_employee_to_request(&key, employee)
                .await
                .unwrap();
        }
        let loaded = manager.get(&key).await.unwrap();
        assert_eq!(loaded.available_slots, 0);
        assert_eq!(loaded.applied_employees.len(), 3);
    }

    #[tokio::test]
    async fn update_slots_writes_through() {
        let (_tracker, manager) = request_manager();
        let key = manager
            .create(&RequestRecord {
                title: "Заявка".into(),
                required_employees: 4,
                ..RequestRecord::default()
            })
            .await
            .unwrap();

        let updated = manager.update_slots(&key, 2).await.unwrap();
        assert_eq!(updated.available_slots, 2);
    }

    #[tokio::test]
    async fn shift_close_stamps_end_time_and_status() {
        let tracker = Arc::new(FakeTracker::new());
        let manager = ShiftManager::new(tracker);

        let key = manager
            .create(&ShiftRecord {
                date: "2024-06-01".into(),
                employee: "77".into(),
                status: "active".into(),
                ..ShiftRecord::default()
            })
            .await
            .unwrap();

        let active = manager.find_active("77").await.unwrap();
        assert_eq!(active.as_ref().map(|(k, _)| k.as_str()), Some(key.as_str()));

        let closed = manager.close(&key, "18:00").await.unwrap();
        assert_eq!(closed.status, "completed");
        assert_eq!(closed.end_time, "18:00");
        assert!(manager.find_active("77").await.unwrap().is_none());
    }
}
