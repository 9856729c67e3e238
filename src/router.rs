//! Menu/command router
//!
//! The namespace-dispatch core. Every inbound action token is parsed into
//! a namespace (one of seven role surfaces) and a verb, checked against
//! the namespace's minimum role and allowed verb set, and dispatched to a
//! single templated screen or one domain-manager call. One parameterized
//! sub-router serves all seven namespaces; only the token prefix and the
//! allowed verb set differ per role.
//!
//! Every route ends by producing exactly one render instruction. There is
//! no multi-step conversation state: each screen is stateless given the
//! token. Manager errors are caught here and rendered as a generic
//! failure; nothing propagates to the transport.

use tracing::{error, warn};

use crate::error::{Result, TrackerError};
use crate::managers::{EmployeeManager, RequestManager, ShiftManager};
use crate::menu::{
    build_menu, format_employee, format_request, main_menu, welcome_text, Button, BACK_TO_MAIN,
};
use crate::records::ShiftRecord;
use crate::roles::{has_permission, Role};

/// What one route produces: the text to show and the buttons under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderInstruction {
    pub text: String,
    pub buttons: Vec<Button>,
}

impl RenderInstruction {
    fn new(text: impl Into<String>, buttons: Vec<Button>) -> Self {
        Self {
            text: text.into(),
            buttons,
        }
    }
}

/// Role surface selected by the token's leading namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Admin,
    Manager,
    Supervisor,
    Employee,
    OutsManager,
    Brigadier,
    OutsEmployee,
}

impl Namespace {
    /// Longest prefixes first so `outs_manager_` never falls into
    /// `manager_` and `outs_employee_` never falls into `employee_`.
    const ALL: [Namespace; 7] = [
        Namespace::OutsEmployee,
        Namespace::OutsManager,
        Namespace::Supervisor,
        Namespace::Brigadier,
        Namespace::Employee,
        Namespace::Manager,
        Namespace::Admin,
    ];

    fn token_prefix(&self) -> &'static str {
        match self {
            Namespace::Admin => "admin_",
            Namespace::Manager => "manager_",
            Namespace::Supervisor => "supervisor_",
            Namespace::Employee => "employee_",
            Namespace::OutsManager => "outs_manager_",
            Namespace::Brigadier => "brigadier_",
            Namespace::OutsEmployee => "outs_employee_",
        }
    }

    /// The lowest role rank allowed to execute this namespace's verbs.
    fn min_role(&self) -> Role {
        match self {
            Namespace::Admin => Role::Admin,
            Namespace::Manager => Role::Manager,
            Namespace::Supervisor => Role::ShiftSupervisor,
            Namespace::Employee => Role::Employee,
            Namespace::OutsManager => Role::OutsStaffManager,
            Namespace::Brigadier => Role::Brigadier,
            Namespace::OutsEmployee => Role::OutsEmployee,
        }
    }

    /// A verb token scoped to this namespace, e.g. `manager_end_shift`.
    fn token(&self, verb: &str) -> String {
        format!("{}{}", self.token_prefix(), verb)
    }

    /// Which verbs this role surface exposes. Verbs outside the set are
    /// rejected even when the caller's rank would otherwise suffice.
    fn allows(&self, verb: &Verb) -> bool {
        use Verb::*;

        let shift = matches!(
            verb,
            ShiftMenu | StartShift | EndShift | ConfirmStartShift | ConfirmEndShift
        );
        let requests = matches!(
            verb,
            RequestsMenu
                | ViewRequests
                | CreateRequest
                | ConfirmCreateRequest
                | RequestDetails(_)
                | SelectEmployees(_)
                | SubmitSelf(_)
                | ConfirmSubmit(_)
        );
        let employees = matches!(
            verb,
            Employees | AddEmployee | SearchEmployee | EmployeeDetails(_) | BlockEmployee(_)
        );
        let approval = matches!(verb, Approval | ApproveShifts | ApproveOvertime);
        let absence = matches!(verb, Absence | PlanAbsence);

        match self {
            Namespace::Admin => {
                employees
                    || approval
                    || matches!(
                        verb,
                        Cities
                            | AddCity
                            | Warehouses
                            | AddWarehouse
                            | Companies
                            | AddCompany
                            | Rates
                            | AddRate
                            | Notifications
                            | SendNotification
                            | Schedules
                            | CreateSchedule
                    )
            }
            Namespace::Manager => {
                shift
                    || approval
                    || requests
                    || employees
                    || absence
                    || matches!(verb, Schedules | ViewSchedule | AddSchedule)
            }
            Namespace::Supervisor => {
                shift
                    || approval
                    || requests
                    || absence
                    || matches!(verb, Schedules | ViewSchedule | AddSchedule)
            }
            Namespace::Employee => shift || absence,
            Namespace::OutsManager => {
                shift || requests || employees || matches!(verb, Rates | CreateRate | ViewRates)
            }
            Namespace::Brigadier => shift || requests,
            Namespace::OutsEmployee => shift,
        }
    }
}

/// Operation selected by the token's verb segment. Trailing segments are
/// positional arguments (entity keys).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    ShiftMenu,
    StartShift,
    EndShift,
    ConfirmStartShift,
    ConfirmEndShift,
    RequestsMenu,
    ViewRequests,
    CreateRequest,
    ConfirmCreateRequest,
    RequestDetails(String),
    SelectEmployees(String),
    SubmitSelf(String),
    ConfirmSubmit(String),
    Employees,
    AddEmployee,
    SearchEmployee,
    EmployeeDetails(String),
    BlockEmployee(String),
    Cities,
    AddCity,
    Warehouses,
    AddWarehouse,
    Companies,
    AddCompany,
    Rates,
    AddRate,
    CreateRate,
    ViewRates,
    Notifications,
    SendNotification,
    Schedules,
    CreateSchedule,
    ViewSchedule,
    AddSchedule,
    Approval,
    ApproveShifts,
    ApproveOvertime,
    Absence,
    PlanAbsence,
}

impl Verb {
    /// Parse the token remainder after the namespace prefix. Tokens are a
    /// loose convention, not a schema: short aliases are accepted and a
    /// missing id segment makes the verb unknown rather than panicking.
    fn parse(rest: &str) -> Option<Verb> {
        for (prefix, build) in [
            (
                "request_details_",
                Verb::RequestDetails as fn(String) -> Verb,
            ),
            ("select_employees_", Verb::SelectEmployees),
            ("submit_self_", Verb::SubmitSelf),
            ("confirm_submit_", Verb::ConfirmSubmit),
            ("edit_employee_", Verb::EmployeeDetails),
            ("block_employee_", Verb::BlockEmployee),
        ] {
            if let Some(id) = rest.strip_prefix(prefix) {
                if id.is_empty() {
                    return None;
                }
                return Some(build(id.to_string()));
            }
        }

        let verb = match rest {
            "shift" => Verb::ShiftMenu,
            "start" | "start_shift" => Verb::StartShift,
            "end" | "end_shift" => Verb::EndShift,
            "confirm_start_shift" => Verb::ConfirmStartShift,
            "confirm_end_shift" => Verb::ConfirmEndShift,
            "requests" => Verb::RequestsMenu,
            "view" | "view_requests" => Verb::ViewRequests,
            "create" | "create_request" => Verb::CreateRequest,
            "confirm_create_request" => Verb::ConfirmCreateRequest,
            "employees" => Verb::Employees,
            "add" | "add_employee" => Verb::AddEmployee,
            "search" | "search_employee" => Verb::SearchEmployee,
            "cities" => Verb::Cities,
            "add_city" => Verb::AddCity,
            "warehouses" => Verb::Warehouses,
            "add_warehouse" => Verb::AddWarehouse,
            "companies" => Verb::Companies,
            "add_company" => Verb::AddCompany,
            "rates" => Verb::Rates,
            "add_rate" => Verb::AddRate,
            "create_rate" => Verb::CreateRate,
            "view_rates" => Verb::ViewRates,
            "notifications" => Verb::Notifications,
            "send_notification" => Verb::SendNotification,
            "schedules" => Verb::Schedules,
            "create_schedule" => Verb::CreateSchedule,
            "view_schedule" => Verb::ViewSchedule,
            "add_schedule" => Verb::AddSchedule,
            "approval" => Verb::Approval,
            "approve_shifts" => Verb::ApproveShifts,
            "approve_overtime" => Verb::ApproveOvertime,
            "absence" => Verb::Absence,
            "plan_absence" => Verb::PlanAbsence,
            _ => return None,
        };
        Some(verb)
    }
}

/// Parsed action token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    BackToMain,
    Scoped { namespace: Namespace, verb: Verb },
    Unknown,
}

impl Action {
    pub fn parse(token: &str) -> Action {
        if token == BACK_TO_MAIN {
            return Action::BackToMain;
        }

        for namespace in Namespace::ALL {
            if let Some(rest) = token.strip_prefix(namespace.token_prefix()) {
                return match Verb::parse(rest) {
                    Some(verb) => Action::Scoped { namespace, verb },
                    None => Action::Unknown,
                };
            }
        }
        Action::Unknown
    }
}

const SHIFT_MENU_TEXT: &str = "Управление сменой:\n- Выйти в смену\n- Закрыть смену\n- Взять оборудование\n- Сдать оборудование\n- Указать номер жилета\n- Указать переработку\n- Указать не профильные часы";
const START_SHIFT_TEXT: &str = "Начало смены:\n\nДля начала смены укажите:\n1. Дату смены\n2. Время начала\n3. Номер жилета (если требуется)\n\nСистема зафиксирует начало смены в Yandex Tracker.";
const END_SHIFT_TEXT: &str = "Завершение смены:\n\nДля завершения смены укажите:\n1. Время окончания\n2. Оборудование, которое сдаете\n3. Дополнительная информация\n\nСистема зафиксирует окончание смены в Yandex Tracker.";
const SHIFT_STARTED_TEXT: &str =
    "Смена успешно начата. Информация зафиксирована в Yandex Tracker.";
const SHIFT_ENDED_TEXT: &str =
    "Смена успешно завершена. Информация зафиксирована в Yandex Tracker.";
const CREATE_REQUEST_TEXT: &str = "Создание заявки на сотрудников:\n\nДля создания заявки укажите:\n1. Объект (склад)\n2. Количество необходимых сотрудников\n3. Требуемые должности/навыки\n4. Дата и время работы\n\nСистема создаст заявку в Yandex Tracker, которая будет доступна для заявления сотрудникам.";
const REQUEST_CREATED_TEXT: &str =
    "Заявка успешно создана. Информация зафиксирована в Yandex Tracker.";
const SUBMITTED_TEXT: &str =
    "Сотрудник успешно заявлен на смену. Информация зафиксирована в Yandex Tracker.";
const NO_SLOTS_TEXT: &str = "К сожалению, все места в этой заявке уже заняты.";
const ADD_EMPLOYEE_TEXT: &str = "Создание сотрудника:\n\nВведите данные сотрудника по следующим полям:\n1. Фамилия\n2. Имя\n3. Отчество\n4. Дата рождения\n5. Телефон\n6. Telegram (ID или @username)\n7. Компания\n8. Рабочая почта\n\nДля аутстафф сотрудников также потребуются:\n- Серия паспорта\n- Номер паспорта\n- и другие данные";
const SEARCH_EMPLOYEE_TEXT: &str = "Поиск сотрудника:\n\nВведите ФИО или ID сотрудника для поиска:";
const EMPLOYEE_BLOCKED_TEXT: &str = "Сотрудник заблокирован.";
const FAILURE_TEXT: &str = "Произошла ошибка при обработке команды.";
const ACCESS_DENIED_TEXT: &str = "Недостаточно прав для выполнения этого действия.";
const UNKNOWN_ACTION_TEXT: &str = "Неизвестное действие. Вернитесь в главное меню.";

/// The router itself: holds the managers its mutating and list verbs call.
pub struct Router {
    employees: EmployeeManager,
    requests: RequestManager,
    shifts: ShiftManager,
}

impl Router {
    pub fn new(employees: EmployeeManager, requests: RequestManager, shifts: ShiftManager) -> Self {
        Self {
            employees,
            requests,
            shifts,
        }
    }

    /// Initial render for a caller whose role has just been resolved.
    /// `back_to_main` must reproduce this render exactly.
    pub fn on_start(&self, role: Role) -> RenderInstruction {
        RenderInstruction::new(welcome_text(role), main_menu(role))
    }

    /// Route one action token to exactly one render instruction. `caller`
    /// is the chat identity used as the employee reference in mutations.
    pub async fn route(&self, token: &str, role: Role, caller: &str) -> RenderInstruction {
        match Action::parse(token) {
            Action::BackToMain => self.on_start(role),
            Action::Unknown => {
                warn!("unknown action token {:?} from role {}", token, role);
                RenderInstruction::new(UNKNOWN_ACTION_TEXT, build_menu(vec![], BACK_TO_MAIN))
            }
            Action::Scoped { namespace, verb } => {
                if !has_permission(role, namespace.min_role()) || !namespace.allows(&verb) {
                    let denied = TrackerError::PermissionDenied {
                        role,
                        action: token.to_string(),
                    };
                    warn!("{}", denied);
                    return RenderInstruction::new(
                        ACCESS_DENIED_TEXT,
                        build_menu(vec![], BACK_TO_MAIN),
                    );
                }

                match self.dispatch(namespace, verb, role, caller).await {
                    Ok(render) => render,
                    Err(err) => {
                        error!("route {} failed: {}", token, err);
                        RenderInstruction::new(FAILURE_TEXT, build_menu(vec![], BACK_TO_MAIN))
                    }
                }
            }
        }
    }

    async fn dispatch(
        &self,
        ns: Namespace,
        verb: Verb,
        role: Role,
        caller: &str,
    ) -> Result<RenderInstruction> {
        let render = match verb {
            Verb::ShiftMenu => RenderInstruction::new(
                SHIFT_MENU_TEXT,
                build_menu(
                    vec![
                        Button::new("Выйти в смену", ns.token("start_shift")),
                        Button::new("Закрыть смену", ns.token("end_shift")),
                    ],
                    BACK_TO_MAIN,
                ),
            ),
            Verb::StartShift => RenderInstruction::new(
                START_SHIFT_TEXT,
                build_menu(
                    vec![
                        Button::new("Подтвердить начало смены", ns.token("confirm_start_shift")),
                        Button::new("Отмена", ns.token("shift")),
                    ],
                    &ns.token("shift"),
                ),
            ),
            Verb::EndShift => RenderInstruction::new(
                END_SHIFT_TEXT,
                build_menu(
                    vec![
                        Button::new("Подтвердить окончание смены", ns.token("confirm_end_shift")),
                        Button::new("Отмена", ns.token("shift")),
                    ],
                    &ns.token("shift"),
                ),
            ),
            Verb::ConfirmStartShift => {
                let now = chrono::Local::now();
                let record = ShiftRecord {
                    date: now.format("%Y-%m-%d").to_string(),
                    employee: caller.to_string(),
                    start_time: now.format("%H:%M").to_string(),
                    status: "active".to_string(),
                    ..ShiftRecord::default()
                };
                let key = self.shifts.create(&record).await?;
                self.shifts
                    .comment(&key, "Смена начата через Telegram-бота.")
                    .await?;

                RenderInstruction::new(
                    SHIFT_STARTED_TEXT,
                    build_menu(
                        vec![Button::new("Закрыть смену", ns.token("end_shift"))],
                        &ns.token("shift"),
                    ),
                )
            }
            Verb::ConfirmEndShift => {
                // The success screen renders even when no open shift is
                // found; the close itself happens only when there is one.
                if let Some((key, _)) = self.shifts.find_active(caller).await? {
                    let end_time = chrono::Local::now().format("%H:%M").to_string();
                    self.shifts.close(&key, &end_time).await?;
                    self.shifts
                        .comment(&key, "Смена завершена через Telegram-бота.")
                        .await?;
                }

                RenderInstruction::new(
                    SHIFT_ENDED_TEXT,
                    build_menu(
                        vec![Button::new("Назад", ns.token("shift"))],
                        &ns.token("shift"),
                    ),
                )
            }
            Verb::RequestsMenu => RenderInstruction::new(
                "Заявки:\n- Посмотреть доступные заявки\n- Создать новую заявку",
                build_menu(
                    vec![
                        Button::new("Посмотреть заявки", ns.token("view_requests")),
                        Button::new("Создать заявку", ns.token("create_request")),
                    ],
                    BACK_TO_MAIN,
                ),
            ),
            Verb::ViewRequests => {
                let requests = self.requests.search("").await?;
                if requests.is_empty() {
                    return Ok(RenderInstruction::new(
                        "Открытых заявок нет.",
                        build_menu(vec![], &ns.token("requests")),
                    ));
                }

                let mut text = String::from("Доступные заявки:\n");
                let mut buttons = Vec::new();
                for (index, (key, request)) in requests.iter().enumerate() {
                    text.push_str(&format!(
                        "\n{}. {} - {} мест ({} свободных)",
                        index + 1,
                        request.title,
                        request.required_employees,
                        request.available_slots,
                    ));
                    buttons.push(Button::new(
                        format!("Заявка {}", index + 1),
                        ns.token(&format!("request_details_{}", key)),
                    ));
                }
                RenderInstruction::new(text, build_menu(buttons, &ns.token("requests")))
            }
            Verb::CreateRequest => RenderInstruction::new(
                CREATE_REQUEST_TEXT,
                build_menu(
                    vec![
                        Button::new("Создать заявку", ns.token("confirm_create_request")),
                        Button::new("Назад", ns.token("requests")),
                    ],
                    &ns.token("requests"),
                ),
            ),
            Verb::ConfirmCreateRequest => RenderInstruction::new(
                REQUEST_CREATED_TEXT,
                build_menu(
                    vec![Button::new("Посмотреть заявки", ns.token("view_requests"))],
                    &ns.token("requests"),
                ),
            ),
            Verb::RequestDetails(key) => {
                let request = self.requests.get(&key).await?;
                let mut text = format_request(&request);

                let buttons = if request.available_slots > 0 {
                    text.push_str(
                        "\n\nВы можете заявить себя или своих сотрудников на эту заявку.",
                    );
                    match role {
                        Role::Manager | Role::ShiftSupervisor => vec![
                            Button::new(
                                "Заявить своих сотрудников",
                                ns.token(&format!("select_employees_{}", key)),
                            ),
                            Button::new(
                                "Заявить себя",
                                ns.token(&format!("submit_self_{}", key)),
                            ),
                        ],
                        Role::OutsStaffManager | Role::Brigadier => vec![Button::new(
                            "Заявить сотрудников компании",
                            ns.token(&format!("select_employees_{}", key)),
                        )],
                        Role::Employee | Role::OutsEmployee => vec![Button::new(
                            "Заявить себя",
                            ns.token(&format!("submit_self_{}", key)),
                        )],
                        Role::Admin => vec![],
                    }
                } else {
                    text.push_str(&format!("\n\n{}", NO_SLOTS_TEXT));
                    vec![]
                };
                RenderInstruction::new(text, build_menu(buttons, &ns.token("requests")))
            }
            Verb::SelectEmployees(key) => {
                let employees = self.employees.search("").await?;
                let buttons = employees
                    .iter()
                    .map(|(_, employee)| {
                        Button::new(
                            format!("{} {}", employee.last_name, employee.first_name),
                            ns.token(&format!("confirm_submit_{}", key)),
                        )
                    })
                    .collect();
                RenderInstruction::new(
                    "Выберите сотрудника для заявки:",
                    build_menu(buttons, &ns.token("requests")),
                )
            }
            Verb::SubmitSelf(key) => RenderInstruction::new(
                "Подтвердите заявление на заявку:",
                build_menu(
                    vec![Button::new(
                        "Подтвердить",
                        ns.token(&format!("confirm_submit_{}", key)),
                    )],
                    &ns.token("requests"),
                ),
            ),
            Verb::ConfirmSubmit(key) => {
                // Slot precondition first: a full request is rendered as
                // such and no write happens.
                let current = self.requests.get(&key).await?;
                if current.available_slots == 0 {
                    return Ok(RenderInstruction::new(
                        NO_SLOTS_TEXT,
                        build_menu(vec![], &ns.token("requests")),
                    ));
                }

                self.requests.add_employee_to_request(&key, caller).await?;

                RenderInstruction::new(
                    SUBMITTED_TEXT,
                    build_menu(
                        vec![Button::new("Посмотреть заявки", ns.token("view_requests"))],
                        &ns.token("requests"),
                    ),
                )
            }
            Verb::Employees => {
                let employees = self.employees.search("").await?;
                let mut text = if employees.is_empty() {
                    String::from("Список сотрудников пуст.")
                } else {
                    String::from("Список сотрудников:\n")
                };
                let mut buttons = Vec::new();
                for (index, (key, employee)) in employees.iter().enumerate() {
                    text.push_str(&format!(
                        "\n{}. {} {} {}",
                        index + 1,
                        employee.last_name,
                        employee.first_name,
                        employee.middle_name,
                    ));
                    buttons.push(Button::new(
                        format!("{} {}", employee.last_name, employee.first_name),
                        ns.token(&format!("edit_employee_{}", key)),
                    ));
                }
                buttons.push(Button::new(
                    "Добавить сотрудника",
                    ns.token("add_employee"),
                ));
                buttons.push(Button::new(
                    "Найти сотрудника",
                    ns.token("search_employee"),
                ));
                RenderInstruction::new(text, build_menu(buttons, &ns.token("employees")))
            }
            Verb::AddEmployee => RenderInstruction::new(
                ADD_EMPLOYEE_TEXT,
                build_menu(vec![], &ns.token("employees")),
            ),
            Verb::SearchEmployee => RenderInstruction::new(
                SEARCH_EMPLOYEE_TEXT,
                build_menu(vec![], &ns.token("employees")),
            ),
            Verb::EmployeeDetails(key) => {
                let employee = self.employees.get(&key).await?;
                RenderInstruction::new(
                    format_employee(&employee),
                    build_menu(
                        vec![
                            Button::new(
                                "Редактировать",
                                ns.token(&format!("edit_employee_{}", key)),
                            ),
                            Button::new(
                                "Заблокировать",
                                ns.token(&format!("block_employee_{}", key)),
                            ),
                        ],
                        &ns.token("employees"),
                    ),
                )
            }
            Verb::BlockEmployee(key) => {
                let mut employee = self.employees.get(&key).await?;
                employee.status = "blocked".to_string();
                self.employees.update(&key, &employee).await?;

                RenderInstruction::new(
                    EMPLOYEE_BLOCKED_TEXT,
                    build_menu(vec![], &ns.token("employees")),
                )
            }
            Verb::Cities => RenderInstruction::new(
                "Управление городами:\n- Добавить город\n- Редактировать город",
                build_menu(
                    vec![Button::new("Добавить", ns.token("add_city"))],
                    BACK_TO_MAIN,
                ),
            ),
            Verb::AddCity => RenderInstruction::new(
                "Добавление города:\n\nУкажите название города.",
                build_menu(vec![], &ns.token("cities")),
            ),
            Verb::Warehouses => RenderInstruction::new(
                "Управление складами:\n- Добавить склад\n- Редактировать склад",
                build_menu(
                    vec![Button::new("Добавить", ns.token("add_warehouse"))],
                    BACK_TO_MAIN,
                ),
            ),
            Verb::AddWarehouse => RenderInstruction::new(
                "Добавление склада:\n\nУкажите название склада, юридическое лицо и площадь.",
                build_menu(vec![], &ns.token("warehouses")),
            ),
            Verb::Companies => RenderInstruction::new(
                "Управление компаниями:\n- Добавить компанию\n- Редактировать компанию",
                build_menu(
                    vec![Button::new("Добавить", ns.token("add_company"))],
                    BACK_TO_MAIN,
                ),
            ),
            Verb::AddCompany => RenderInstruction::new(
                "Добавление компании:\n\nУкажите полное наименование, ИНН и банковские реквизиты.",
                build_menu(vec![], &ns.token("companies")),
            ),
            Verb::Rates => match ns {
                Namespace::OutsManager => RenderInstruction::new(
                    "Тарифы:\n- Создать заявку на тариф\n- Просмотреть заявки\n- Просмотр текущих тарифов",
                    build_menu(
                        vec![
                            Button::new("Создать", ns.token("create_rate")),
                            Button::new("Просмотр", ns.token("view_rates")),
                        ],
                        BACK_TO_MAIN,
                    ),
                ),
                _ => RenderInstruction::new(
                    "Управление тарифами:\n- Добавить тариф\n- Редактировать тариф",
                    build_menu(
                        vec![Button::new("Добавить", ns.token("add_rate"))],
                        BACK_TO_MAIN,
                    ),
                ),
            },
            Verb::AddRate | Verb::CreateRate => RenderInstruction::new(
                "Создание тарифа:\n\nУкажите объект, должность и ставку.",
                build_menu(vec![], &ns.token("rates")),
            ),
            Verb::ViewRates => RenderInstruction::new(
                "Просмотр тарифов:\n\nТекущие тарифы ведутся в Yandex Tracker.",
                build_menu(vec![], &ns.token("rates")),
            ),
            Verb::Notifications => RenderInstruction::new(
                "Управление уведомлениями:\n- Отправить уведомление\n- Настроить рассылку",
                build_menu(
                    vec![Button::new("Отправить", ns.token("send_notification"))],
                    BACK_TO_MAIN,
                ),
            ),
            Verb::SendNotification => RenderInstruction::new(
                "Отправка уведомления:\n\nУкажите текст уведомления и получателей.",
                build_menu(vec![], &ns.token("notifications")),
            ),
            Verb::Schedules => match ns {
                Namespace::Admin => RenderInstruction::new(
                    "Управление графиками:\n- Создать график\n- Редактировать график",
                    build_menu(
                        vec![Button::new("Создать", ns.token("create_schedule"))],
                        BACK_TO_MAIN,
                    ),
                ),
                _ => RenderInstruction::new(
                    "Управление графиками:\n- Просмотр по дням\n- Редактировать график сотрудника\n- Добавить смену вне графика",
                    build_menu(
                        vec![
                            Button::new("Просмотр", ns.token("view_schedule")),
                            Button::new("Добавить", ns.token("add_schedule")),
                        ],
                        BACK_TO_MAIN,
                    ),
                ),
            },
            Verb::CreateSchedule => RenderInstruction::new(
                "Создание графика:\n\nУкажите сотрудника, объект и даты смен.",
                build_menu(vec![], &ns.token("schedules")),
            ),
            Verb::ViewSchedule => RenderInstruction::new(
                "Просмотр графиков:\n\nВыберите день для просмотра смен.",
                build_menu(vec![], &ns.token("schedules")),
            ),
            Verb::AddSchedule => RenderInstruction::new(
                "Добавление смены вне графика:\n\nУкажите сотрудника, дату и время.",
                build_menu(vec![], &ns.token("schedules")),
            ),
            Verb::Approval => RenderInstruction::new(
                "Согласование:\n- Смены\n- Переработки\n- Не профильные часы\n- Отпуска",
                build_menu(
                    vec![
                        Button::new("Смены", ns.token("approve_shifts")),
                        Button::new("Переработки", ns.token("approve_overtime")),
                    ],
                    BACK_TO_MAIN,
                ),
            ),
            Verb::ApproveShifts => RenderInstruction::new(
                "Согласование смен:\n\nВыберите смену для согласования.",
                build_menu(vec![], &ns.token("approval")),
            ),
            Verb::ApproveOvertime => RenderInstruction::new(
                "Согласование переработок:\n\nВыберите переработку для согласования.",
                build_menu(vec![], &ns.token("approval")),
            ),
            Verb::Absence => RenderInstruction::new(
                "Отсутствие:\n- Запланировать отсутствие\n- Просмотреть отсутствие\n- Отправить на согласование",
                build_menu(
                    vec![Button::new("Запланировать", ns.token("plan_absence"))],
                    BACK_TO_MAIN,
                ),
            ),
            Verb::PlanAbsence => RenderInstruction::new(
                "Планирование отсутствия:\n\nУкажите тип отсутствия и период.",
                build_menu(vec![], &ns.token("absence")),
            ),
        };
        Ok(render)
    }
}
