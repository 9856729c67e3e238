//! Presentation formatters
//!
//! Pure functions: record-to-text renderers and button-layout builders.
//! No formatter touches the tracker; absent fields render as empty
//! strings, and `format_request` prints the stored slot count rather than
//! recomputing it.

use crate::records::{CompanyRecord, EmployeeRecord, RequestRecord, ShiftRecord};
use crate::roles::Role;

/// Universal, role-independent token that re-renders the main menu.
pub const BACK_TO_MAIN: &str = "back_to_main";

/// A single inline button: label plus the action token it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: String,
}

impl Button {
    pub fn new(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
        }
    }
}

/// Append the mandatory back button after the provided rows.
pub fn build_menu(buttons: Vec<Button>, back_target: &str) -> Vec<Button> {
    let mut rows = buttons;
    rows.push(Button::new("Назад", back_target));
    rows
}

pub fn welcome_text(role: Role) -> String {
    format!(
        "Добро пожаловать в систему управления персоналом!\nВаша роль: {}\n\nВыберите действие из меню ниже:",
        role
    )
}

/// The role's main menu. Each entry fires a namespaced action token; the
/// verb surface is role-parallel, only the namespace differs.
pub fn main_menu(role: Role) -> Vec<Button> {
    let buttons = match role {
        Role::Admin => vec![
            Button::new("Управление сотрудниками", "admin_employees"),
            Button::new("Управление городами", "admin_cities"),
            Button::new("Управление складами", "admin_warehouses"),
            Button::new("Управление компаниями", "admin_companies"),
            Button::new("Тарифы", "admin_rates"),
            Button::new("Уведомления", "admin_notifications"),
            Button::new("Графики", "admin_schedules"),
            Button::new("Согласование", "admin_approval"),
        ],
        Role::Manager => vec![
            Button::new("Смена", "manager_shift"),
            Button::new("Согласование", "manager_approval"),
            Button::new("Заявки", "manager_requests"),
            Button::new("Сотрудники", "manager_employees"),
            Button::new("Графики", "manager_schedules"),
            Button::new("Отсутствие", "manager_absence"),
        ],
        Role::ShiftSupervisor => vec![
            Button::new("Смена", "supervisor_shift"),
            Button::new("Согласование", "supervisor_approval"),
            Button::new("Заявки", "supervisor_requests"),
            Button::new("Графики", "supervisor_schedules"),
            Button::new("Отсутствие", "supervisor_absence"),
        ],
        Role::Employee => vec![
            Button::new("Смена", "employee_shift"),
            Button::new("Отсутствие", "employee_absence"),
        ],
        Role::OutsStaffManager => vec![
            Button::new("Смена", "outs_manager_shift"),
            Button::new("Заявки", "outs_manager_requests"),
            Button::new("Тарифы", "outs_manager_rates"),
            Button::new("Сотрудники", "outs_manager_employees"),
        ],
        Role::Brigadier => vec![
            Button::new("Смена", "brigadier_shift"),
            Button::new("Заявки", "brigadier_requests"),
        ],
        Role::OutsEmployee => vec![Button::new("Смена", "outs_employee_shift")],
    };

    build_menu(buttons, BACK_TO_MAIN)
}

pub fn format_employee(employee: &EmployeeRecord) -> String {
    format!(
        "ФИО: {} {} {}\nДата рождения: {}\nТелефон: {}\nTelegram: {}\nКомпания: {}\nРоль: {}\nСтатус: {}",
        employee.last_name,
        employee.first_name,
        employee.middle_name,
        employee.birth_date,
        employee.phone,
        employee.telegram,
        employee.company,
        employee.role,
        employee.status,
    )
}

pub fn format_company(company: &CompanyRecord) -> String {
    format!(
        "Полное наименование: {}\nСокращенное наименование: {}\nИНН: {}\nФактический адрес: {}\nЮридический адрес: {}\nРуководитель: {}",
        company.full_name,
        company.short_name,
        company.inn,
        company.actual_address,
        company.legal_address,
        company.director_fio,
    )
}

pub fn format_shift(shift: &ShiftRecord) -> String {
    format!(
        "Дата: {}\nСотрудник: {}\nВремя начала: {}\nВремя окончания: {}\nНомер жилета: {}\nСтатус: {}",
        shift.date,
        shift.employee_name,
        shift.start_time,
        shift.end_time,
        shift.vest_number,
        shift.status,
    )
}

pub fn format_request(request: &RequestRecord) -> String {
    format!(
        "Заголовок: {}\nОбъект: {}\nНеобходимо сотрудников: {}\nЗаявлено сотрудников: {}\nСвободных мест: {}\nСтатус: {}",
        request.title,
        request.object,
        request.required_employees,
        request.applied_employees.len(),
        request.available_slots,
        request.status,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_menu_appends_back_button_last() {
        let rows = build_menu(
            vec![Button::new("Смены", "manager_approve_shifts")],
            "manager_approval",
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.last().unwrap().label, "Назад");
        assert_eq!(rows.last().unwrap().action, "manager_approval");
    }

    #[test]
    fn employee_menu_is_exactly_shift_absence_and_back() {
        let actions: Vec<String> = main_menu(Role::Employee)
            .into_iter()
            .map(|b| b.action)
            .collect();
        assert_eq!(
            actions,
            vec!["employee_shift", "employee_absence", BACK_TO_MAIN]
        );
    }

    #[test]
    fn every_main_menu_ends_with_back_to_main() {
        for role in Role::ALL {
            let menu = main_menu(role);
            assert_eq!(menu.last().unwrap().action, BACK_TO_MAIN, "{role}");
        }
    }

    #[test]
    fn format_request_prints_stored_slot_count() {
        // Slots deliberately inconsistent with required/applied: the
        // formatter must not recompute.
        let request = RequestRecord {
            title: "Заявка на сотрудников".into(),
            object: "Склад №1".into(),
            required_employees: 5,
            applied_employees: vec!["EMP-1".into(), "EMP-2".into()],
            available_slots: 1,
            status: "open".into(),
            ..RequestRecord::default()
        };
        let text = format_request(&request);
        assert!(text.contains("Необходимо сотрудников: 5"));
        assert!(text.contains("Заявлено сотрудников: 2"));
        assert!(text.contains("Свободных мест: 1"));
    }

    #[test]
    fn format_employee_renders_absent_fields_as_empty() {
        let text = format_employee(&EmployeeRecord::default());
        assert!(text.starts_with("ФИО:"));
        assert!(text.contains("Телефон: \n"));
    }
}
