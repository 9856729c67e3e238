//! Domain records
//!
//! Typed views over one tracker issue's custom fields, one record type per
//! queue. No record enforces required fields at this layer: absent fields
//! default to empty string / zero / empty list at read and write time.

use serde_json::{Map, Value};

use crate::tracker::Issue;

fn str_field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn u32_field(fields: &Map<String, Value>, key: &str) -> u32 {
    fields.get(key).and_then(Value::as_u64).unwrap_or(0) as u32
}

fn list_field(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn string_value(value: &str) -> Value {
    Value::String(value.to_string())
}

fn list_value(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

fn non_empty_or(value: &str, default: &str) -> Value {
    if value.is_empty() {
        string_value(default)
    } else {
        string_value(value)
    }
}

/// Employee card. Carries the full personnel field set including the
/// passport and bank blocks required for outstaffed employees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeRecord {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub birth_date: String,
    pub phone: String,
    pub telegram: String,
    pub company: String,
    pub objects: Vec<String>,
    pub work_email: String,
    pub passport_series: String,
    pub passport_number: String,
    pub passport_division: String,
    pub passport_issue_date: String,
    pub passport_issued_by: String,
    pub birth_city: String,
    pub registration_address: String,
    pub registration_date: String,
    pub education: String,
    pub bank: String,
    pub account_number: String,
    pub bic: String,
    pub corr_account: String,
    pub bank_inn: String,
    pub role: String,
    pub status: String,
}

impl EmployeeRecord {
    pub fn summary(&self) -> String {
        format!("Сотрудник: {} {}", self.first_name, self.last_name)
    }

    pub fn to_custom_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("lastName".into(), string_value(&self.last_name));
        fields.insert("firstName".into(), string_value(&self.first_name));
        fields.insert("middleName".into(), string_value(&self.middle_name));
        fields.insert("birthDate".into(), string_value(&self.birth_date));
        fields.insert("phone".into(), string_value(&self.phone));
        fields.insert("telegram".into(), string_value(&self.telegram));
        fields.insert("company".into(), string_value(&self.company));
        fields.insert("objects".into(), list_value(&self.objects));
        fields.insert("workEmail".into(), string_value(&self.work_email));
        fields.insert("passportSeries".into(), string_value(&self.passport_series));
        fields.insert("passportNumber".into(), string_value(&self.passport_number));
        fields.insert(
            "passportDivision".into(),
            string_value(&self.passport_division),
        );
        fields.insert(
            "passportIssueDate".into(),
            string_value(&self.passport_issue_date),
        );
        fields.insert(
            "passportIssuedBy".into(),
            string_value(&self.passport_issued_by),
        );
        fields.insert("birthCity".into(), string_value(&self.birth_city));
        fields.insert(
            "registrationAddress".into(),
            string_value(&self.registration_address),
        );
        fields.insert(
            "registrationDate".into(),
            string_value(&self.registration_date),
        );
        fields.insert("education".into(), string_value(&self.education));
        fields.insert("bank".into(), string_value(&self.bank));
        fields.insert("accountNumber".into(), string_value(&self.account_number));
        fields.insert("bic".into(), string_value(&self.bic));
        fields.insert("corrAccount".into(), string_value(&self.corr_account));
        fields.insert("bankInn".into(), string_value(&self.bank_inn));
        fields.insert("role".into(), non_empty_or(&self.role, "employee"));
        fields.insert("status".into(), non_empty_or(&self.status, "active"));
        fields
    }

    pub fn from_issue(issue: &Issue) -> Self {
        let f = &issue.custom_fields;
        Self {
            last_name: str_field(f, "lastName"),
            first_name: str_field(f, "firstName"),
            middle_name: str_field(f, "middleName"),
            birth_date: str_field(f, "birthDate"),
            phone: str_field(f, "phone"),
            telegram: str_field(f, "telegram"),
            company: str_field(f, "company"),
            objects: list_field(f, "objects"),
            work_email: str_field(f, "workEmail"),
            passport_series: str_field(f, "passportSeries"),
            passport_number: str_field(f, "passportNumber"),
            passport_division: str_field(f, "passportDivision"),
            passport_issue_date: str_field(f, "passportIssueDate"),
            passport_issued_by: str_field(f, "passportIssuedBy"),
            birth_city: str_field(f, "birthCity"),
            registration_address: str_field(f, "registrationAddress"),
            registration_date: str_field(f, "registrationDate"),
            education: str_field(f, "education"),
            bank: str_field(f, "bank"),
            account_number: str_field(f, "accountNumber"),
            bic: str_field(f, "bic"),
            corr_account: str_field(f, "corrAccount"),
            bank_inn: str_field(f, "bankInn"),
            role: str_field(f, "role"),
            status: str_field(f, "status"),
        }
    }
}

/// Company card with registration and bank requisites.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyRecord {
    pub director_fio: String,
    pub full_name: String,
    pub short_name: String,
    pub inn: String,
    pub actual_address: String,
    pub legal_address: String,
    pub ogrnip: String,
    pub ogrn: String,
    pub okpo: String,
    pub bank: String,
    pub bik: String,
    pub corr_account: String,
    pub account: String,
    pub email: String,
    pub phone: String,
    pub okved: String,
    pub tax_system: String,
}

impl CompanyRecord {
    pub fn summary(&self) -> String {
        format!("Компания: {}", self.full_name)
    }

    pub fn to_custom_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("directorFio".into(), string_value(&self.director_fio));
        fields.insert("fullName".into(), string_value(&self.full_name));
        fields.insert("shortName".into(), string_value(&self.short_name));
        fields.insert("inn".into(), string_value(&self.inn));
        fields.insert("actualAddress".into(), string_value(&self.actual_address));
        fields.insert("legalAddress".into(), string_value(&self.legal_address));
        fields.insert("ogrnip".into(), string_value(&self.ogrnip));
        fields.insert("ogrn".into(), string_value(&self.ogrn));
        fields.insert("okpo".into(), string_value(&self.okpo));
        fields.insert("bank".into(), string_value(&self.bank));
        fields.insert("bik".into(), string_value(&self.bik));
        fields.insert("corrAccount".into(), string_value(&self.corr_account));
        fields.insert("account".into(), string_value(&self.account));
        fields.insert("email".into(), string_value(&self.email));
        fields.insert("phone".into(), string_value(&self.phone));
        fields.insert("okved".into(), string_value(&self.okved));
        fields.insert("taxSystem".into(), string_value(&self.tax_system));
        fields
    }

    pub fn from_issue(issue: &Issue) -> Self {
        let f = &issue.custom_fields;
        Self {
            director_fio: str_field(f, "directorFio"),
            full_name: str_field(f, "fullName"),
            short_name: str_field(f, "shortName"),
            inn: str_field(f, "inn"),
            actual_address: str_field(f, "actualAddress"),
            legal_address: str_field(f, "legalAddress"),
            ogrnip: str_field(f, "ogrnip"),
            ogrn: str_field(f, "ogrn"),
            okpo: str_field(f, "okpo"),
            bank: str_field(f, "bank"),
            bik: str_field(f, "bik"),
            corr_account: str_field(f, "corrAccount"),
            account: str_field(f, "account"),
            email: str_field(f, "email"),
            phone: str_field(f, "phone"),
            okved: str_field(f, "okved"),
            tax_system: str_field(f, "taxSystem"),
        }
    }
}

/// City reference record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityRecord {
    pub name: String,
}

impl CityRecord {
    pub fn summary(&self) -> String {
        format!("Город: {}", self.name)
    }

    pub fn to_custom_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("name".into(), string_value(&self.name));
        fields
    }

    pub fn from_issue(issue: &Issue) -> Self {
        Self {
            name: str_field(&issue.custom_fields, "name"),
        }
    }
}

/// Warehouse card, including the partner/warehouse chat references.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarehouseRecord {
    pub name: String,
    pub synonyms: Vec<String>,
    pub partner_chat_id: String,
    pub partner_chat_link: String,
    pub warehouse_chat_id: String,
    pub warehouse_chat_link: String,
    pub legal_entity: String,
    pub area: String,
    pub self_operated: String,
    pub opening_date: String,
    pub closing_date: String,
    pub status: String,
    pub tg_cs: String,
    pub phone: String,
    pub work_account: String,
}

impl WarehouseRecord {
    pub fn summary(&self) -> String {
        format!("Склад: {}", self.name)
    }

    pub fn to_custom_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("name".into(), string_value(&self.name));
        fields.insert("synonyms".into(), list_value(&self.synonyms));
        fields.insert("partnerChatId".into(), string_value(&self.partner_chat_id));
        fields.insert(
            "partnerChatLink".into(),
            string_value(&self.partner_chat_link),
        );
        fields.insert(
            "warehouseChatId".into(),
            string_value(&self.warehouse_chat_id),
        );
        fields.insert(
            "warehouseChatLink".into(),
            string_value(&self.warehouse_chat_link),
        );
        fields.insert("legalEntity".into(), string_value(&self.legal_entity));
        fields.insert("area".into(), string_value(&self.area));
        fields.insert("selfOperated".into(), string_value(&self.self_operated));
        fields.insert("openingDate".into(), string_value(&self.opening_date));
        fields.insert("closingDate".into(), string_value(&self.closing_date));
        fields.insert("status".into(), string_value(&self.status));
        fields.insert("tgCs".into(), string_value(&self.tg_cs));
        fields.insert("phone".into(), string_value(&self.phone));
        fields.insert("workAccount".into(), string_value(&self.work_account));
        fields
    }

    pub fn from_issue(issue: &Issue) -> Self {
        let f = &issue.custom_fields;
        Self {
            name: str_field(f, "name"),
            synonyms: list_field(f, "synonyms"),
            partner_chat_id: str_field(f, "partnerChatId"),
            partner_chat_link: str_field(f, "partnerChatLink"),
            warehouse_chat_id: str_field(f, "warehouseChatId"),
            warehouse_chat_link: str_field(f, "warehouseChatLink"),
            legal_entity: str_field(f, "legalEntity"),
            area: str_field(f, "area"),
            self_operated: str_field(f, "selfOperated"),
            opening_date: str_field(f, "openingDate"),
            closing_date: str_field(f, "closingDate"),
            status: str_field(f, "status"),
            tg_cs: str_field(f, "tgCs"),
            phone: str_field(f, "phone"),
            work_account: str_field(f, "workAccount"),
        }
    }
}

/// One work shift of one employee.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShiftRecord {
    pub date: String,
    pub employee: String,
    pub employee_name: String,
    pub start_time: String,
    pub end_time: String,
    pub vest_number: String,
    pub overtime: String,
    pub non_profile_hours: String,
    pub equipment_taken: Vec<String>,
    pub equipment_returned: Vec<String>,
    pub status: String,
}

impl ShiftRecord {
    pub fn summary(&self) -> String {
        format!("Смена: {} - {}", self.date, self.employee_name)
    }

    pub fn to_custom_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("date".into(), string_value(&self.date));
        fields.insert("employee".into(), string_value(&self.employee));
        fields.insert("employeeName".into(), string_value(&self.employee_name));
        fields.insert("startTime".into(), string_value(&self.start_time));
        fields.insert("endTime".into(), string_value(&self.end_time));
        fields.insert("vestNumber".into(), string_value(&self.vest_number));
        fields.insert("overtime".into(), string_value(&self.overtime));
        fields.insert(
            "nonProfileHours".into(),
            string_value(&self.non_profile_hours),
        );
        fields.insert("equipmentTaken".into(), list_value(&self.equipment_taken));
        fields.insert(
            "equipmentReturned".into(),
            list_value(&self.equipment_returned),
        );
        fields.insert("status".into(), non_empty_or(&self.status, "planned"));
        fields
    }

    pub fn from_issue(issue: &Issue) -> Self {
        let f = &issue.custom_fields;
        Self {
            date: str_field(f, "date"),
            employee: str_field(f, "employee"),
            employee_name: str_field(f, "employeeName"),
            start_time: str_field(f, "startTime"),
            end_time: str_field(f, "endTime"),
            vest_number: str_field(f, "vestNumber"),
            overtime: str_field(f, "overtime"),
            non_profile_hours: str_field(f, "nonProfileHours"),
            equipment_taken: list_field(f, "equipmentTaken"),
            equipment_returned: list_field(f, "equipmentReturned"),
            status: str_field(f, "status"),
        }
    }
}

/// Staffing request. `available_slots` is maintained by the write path
/// (`required_employees - applied_employees.len()`, clamped at zero) and
/// is never recomputed at render time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestRecord {
    pub title: String,
    pub description: String,
    pub requester: String,
    pub requester_name: String,
    pub object: String,
    pub required_employees: u32,
    pub available_slots: u32,
    pub applied_employees: Vec<String>,
    pub status: String,
}

impl RequestRecord {
    pub fn summary(&self) -> String {
        format!("Заявка: {}", self.title)
    }

    pub fn to_custom_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("title".into(), string_value(&self.title));
        fields.insert("requester".into(), string_value(&self.requester));
        fields.insert("requesterName".into(), string_value(&self.requester_name));
        fields.insert("object".into(), string_value(&self.object));
        fields.insert(
            "requiredEmployees".into(),
            Value::from(self.required_employees),
        );
        fields.insert("availableSlots".into(), Value::from(self.available_slots));
        fields.insert(
            "appliedEmployees".into(),
            list_value(&self.applied_employees),
        );
        fields.insert("status".into(), non_empty_or(&self.status, "open"));
        fields
    }

    pub fn from_issue(issue: &Issue) -> Self {
        let f = &issue.custom_fields;
        Self {
            title: str_field(f, "title"),
            description: issue.description.clone(),
            requester: str_field(f, "requester"),
            requester_name: str_field(f, "requesterName"),
            object: str_field(f, "object"),
            required_employees: u32_field(f, "requiredEmployees"),
            available_slots: u32_field(f, "availableSlots"),
            applied_employees: list_field(f, "appliedEmployees"),
            status: str_field(f, "status"),
        }
    }
}
