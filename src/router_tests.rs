//! End-to-end route behavior over an in-memory tracker.
//!
//! Covers the properties the router must hold: back-to-main idempotence,
//! the central permission gate, and the request-submission mutation path.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{Map, Value};

    use crate::managers::{EmployeeManager, RequestManager, ShiftManager};
    use crate::menu::BACK_TO_MAIN;
    use crate::records::EmployeeRecord;
    use crate::roles::Role;
    use crate::router::Router;
    use crate::tracker::testing::FakeTracker;

    fn router_with(tracker: Arc<FakeTracker>) -> Router {
        Router::new(
            EmployeeManager::new(tracker.clone()),
            RequestManager::new(tracker.clone()),
            ShiftManager::new(tracker),
        )
    }

    fn request_fields(required: u32, available: u32, applied: &[&str]) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("title".into(), Value::String("Заявка на сотрудников".into()));
        fields.insert("object".into(), Value::String("Склад №1".into()));
        fields.insert("requiredEmployees".into(), Value::from(required));
        fields.insert("availableSlots".into(), Value::from(available));
        fields.insert(
            "appliedEmployees".into(),
            Value::Array(applied.iter().map(|e| Value::String((*e).into())).collect()),
        );
        fields.insert("status".into(), Value::String("open".into()));
        fields
    }

    #[tokio::test]
    async fn back_to_main_matches_initial_render_for_every_role() {
        let router = router_with(Arc::new(FakeTracker::new()));
        for role in Role::ALL {
            let initial = router.on_start(role);
            let back = router.route(BACK_TO_MAIN, role, "100").await;
            assert_eq!(back, initial, "{role}");
        }
    }

    #[tokio::test]
    async fn unresolved_identity_gets_the_employee_menu() {
        let tracker = Arc::new(FakeTracker::new());
        let resolver = crate::roles::RoleResolver::new(
            None,
            Arc::new(EmployeeManager::new(tracker.clone())),
        );

        // No employee record matches, so the caller degrades to employee.
        let role = resolver.resolve("999").await;
        assert_eq!(role, Role::Employee);

        let render = router_with(tracker).on_start(role);
        let actions: Vec<&str> = render.buttons.iter().map(|b| b.action.as_str()).collect();
        assert_eq!(
            actions,
            vec!["employee_shift", "employee_absence", "back_to_main"]
        );
    }

    #[tokio::test]
    async fn foreign_namespace_is_denied_for_low_ranked_roles() {
        let tracker = Arc::new(FakeTracker::new());
        let router = router_with(tracker.clone());

        // A guessed admin token from an employee must not reach a manager.
        let render = router.route("admin_employees", Role::Employee, "100").await;
        assert!(render.text.contains("Недостаточно прав"));

        let render = router
            .route("manager_confirm_submit_REQ-1", Role::OutsEmployee, "100")
            .await;
        assert!(render.text.contains("Недостаточно прав"));
        assert!(tracker.issue("REQ-1").is_none());
    }

    #[tokio::test]
    async fn verbs_outside_the_namespace_set_are_denied() {
        let router = router_with(Arc::new(FakeTracker::new()));

        // Requests are not part of the employee surface even though the
        // caller owns the namespace.
        let render = router.route("employee_requests", Role::Employee, "100").await;
        assert!(render.text.contains("Недостаточно прав"));

        // Shifts are not part of the admin surface.
        let render = router.route("admin_shift", Role::Admin, "100").await;
        assert!(render.text.contains("Недостаточно прав"));
    }

    #[tokio::test]
    async fn higher_rank_may_use_lower_namespaces() {
        let router = router_with(Arc::new(FakeTracker::new()));
        let render = router.route("employee_shift", Role::Admin, "100").await;
        assert!(render.text.starts_with("Управление сменой:"));
    }

    #[tokio::test]
    async fn confirm_submit_applies_caller_and_decrements() {
        let tracker = Arc::new(FakeTracker::new());
        tracker.seed("REQ-1", request_fields(5, 5, &[]));
        let router = router_with(tracker.clone());

        let render = router
            .route("manager_confirm_submit_REQ-1", Role::Manager, "555")
            .await;
        assert!(render.text.contains("успешно заявлен"));

        let issue = tracker.issue("REQ-1").unwrap();
        assert_eq!(issue.custom_fields["availableSlots"], 4);
        assert_eq!(
            issue.custom_fields["appliedEmployees"],
            Value::Array(vec![Value::String("555".into())])
        );

        // Same caller again: success text, but the record is unchanged.
        router
            .route("manager_confirm_submit_REQ-1", Role::Manager, "555")
            .await;
        let issue = tracker.issue("REQ-1").unwrap();
        assert_eq!(issue.custom_fields["availableSlots"], 4);
        assert_eq!(
            issue.custom_fields["appliedEmployees"]
                .as_array()
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn confirm_submit_on_full_request_writes_nothing() {
        let tracker = Arc::new(FakeTracker::new());
        tracker.seed("REQ-2", request_fields(2, 0, &["E1", "E2"]));
        let router = router_with(tracker.clone());

        let render = router
            .route("manager_confirm_submit_REQ-2", Role::Manager, "555")
            .await;
        assert!(render.text.contains("все места в этой заявке уже заняты"));

        let issue = tracker.issue("REQ-2").unwrap();
        assert_eq!(issue.custom_fields["availableSlots"], 0);
        assert_eq!(
            issue.custom_fields["appliedEmployees"]
                .as_array()
                .unwrap()
                .len(),
            2
        );
    }

    #[tokio::test]
    async fn request_details_render_stored_slot_count() {
        let tracker = Arc::new(FakeTracker::new());
        // Deliberately inconsistent slots to prove no recomputation.
        tracker.seed("REQ-3", request_fields(5, 3, &[]));
        let router = router_with(tracker);

        let render = router
            .route("supervisor_request_details_REQ-3", Role::ShiftSupervisor, "1")
            .await;
        assert!(render.text.contains("Свободных мест: 3"));
        assert!(render.text.contains("заявить себя"));

        let actions: Vec<&str> = render.buttons.iter().map(|b| b.action.as_str()).collect();
        assert!(actions.contains(&"supervisor_select_employees_REQ-3"));
        assert!(actions.contains(&"supervisor_submit_self_REQ-3"));
        assert_eq!(*actions.last().unwrap(), "supervisor_requests");
    }

    #[tokio::test]
    async fn view_requests_lists_every_open_request() {
        let tracker = Arc::new(FakeTracker::new());
        tracker.seed("REQ-1", request_fields(5, 3, &[]));
        tracker.seed("REQ-2", request_fields(2, 2, &[]));
        let router = router_with(tracker);

        let render = router.route("manager_view_requests", Role::Manager, "1").await;
        assert!(render.text.starts_with("Доступные заявки:"));
        assert!(render.text.contains("- 5 мест (3 свободных)"));

        let actions: Vec<&str> = render.buttons.iter().map(|b| b.action.as_str()).collect();
        assert!(actions.contains(&"manager_request_details_REQ-1"));
        assert!(actions.contains(&"manager_request_details_REQ-2"));
        assert_eq!(*actions.last().unwrap(), "manager_requests");
    }

    #[tokio::test]
    async fn employee_list_round_trips_through_the_add_screen() {
        let tracker = Arc::new(FakeTracker::new());
        let router = router_with(tracker.clone());

        let employees = EmployeeManager::new(tracker);
        employees
            .create(&EmployeeRecord {
                last_name: "Иванов".into(),
                first_name: "Иван".into(),
                ..EmployeeRecord::default()
            })
            .await
            .unwrap();

        let list = router.route("manager_employees", Role::Manager, "1").await;
        assert!(list.text.contains("Иванов Иван"));
        let actions: Vec<&str> = list.buttons.iter().map(|b| b.action.as_str()).collect();
        assert!(actions.contains(&"manager_add_employee"));
        assert!(actions.contains(&"manager_edit_employee_EMP-1"));

        // The add screen's back target returns to the employee list.
        let add = router.route("manager_add_employee", Role::Manager, "1").await;
        assert!(add.text.starts_with("Создание сотрудника:"));
        assert_eq!(add.buttons.last().unwrap().action, "manager_employees");
    }

    #[tokio::test]
    async fn block_employee_writes_blocked_status() {
        let tracker = Arc::new(FakeTracker::new());
        let router = router_with(tracker.clone());

        EmployeeManager::new(tracker.clone())
            .create(&EmployeeRecord {
                last_name: "Петров".into(),
                ..EmployeeRecord::default()
            })
            .await
            .unwrap();

        let render = router
            .route("admin_block_employee_EMP-1", Role::Admin, "1")
            .await;
        assert_eq!(render.text, "Сотрудник заблокирован.");
        assert_eq!(
            tracker.issue("EMP-1").unwrap().custom_fields["status"],
            "blocked"
        );
    }

    #[tokio::test]
    async fn shift_confirmation_opens_and_closes_a_shift() {
        let tracker = Arc::new(FakeTracker::new());
        let router = router_with(tracker.clone());

        let started = router
            .route("employee_confirm_start_shift", Role::Employee, "77")
            .await;
        assert!(started.text.contains("Смена успешно начата"));
        let shift = tracker.issue("SHIFT-1").unwrap();
        assert_eq!(shift.custom_fields["employee"], "77");
        assert_eq!(shift.custom_fields["status"], "active");

        let ended = router
            .route("employee_confirm_end_shift", Role::Employee, "77")
            .await;
        assert!(ended.text.contains("Смена успешно завершена"));
        let shift = tracker.issue("SHIFT-1").unwrap();
        assert_eq!(shift.custom_fields["status"], "completed");
    }

    #[tokio::test]
    async fn missing_request_renders_generic_failure() {
        let router = router_with(Arc::new(FakeTracker::new()));
        let render = router
            .route("manager_request_details_REQ-404", Role::Manager, "1")
            .await;
        assert!(render.text.contains("Произошла ошибка"));
    }

    #[tokio::test]
    async fn unknown_token_renders_fallback_screen() {
        let router = router_with(Arc::new(FakeTracker::new()));
        let render = router.route("manager_fly_to_moon", Role::Manager, "1").await;
        assert!(render.text.contains("Неизвестное действие"));
        assert_eq!(render.buttons.last().unwrap().action, BACK_TO_MAIN);
    }
}
