//! Main application UI.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use eframe::egui::{self, Align, Layout, ProgressBar};
use sea_orm::DatabaseConnection;
use tokio::sync::mpsc;

use crate::archive::{ArchiveEntry, ArchiveResult};
use crate::config::AppConfig;
use crate::db;
use crate::db::connection::TableCounts;
use crate::entities::{employee, student, user};
use crate::keyboard::{self, KeyCap, KeyboardState};
use crate::models::employee::{CreateEmployee, UpdateEmployee, parse_salary_cents};
use crate::models::student::{CreateStudent, UpdateStudent};
use crate::models::user::CreateUser;
use crate::ocr::OcrEngine;
use crate::pdf::{self, ExtractedImage};

use super::components::colors;
use super::{
    archive_panel, dashboard, employees_panel, keyboard_panel, ocr_panel, pdf_images_panel, pdf_text_panel,
    students_panel, users_panel,
};

/// Current panel being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Dashboard,
    Users,
    Students,
    Employees,
    PdfText,
    PdfImages,
    Ocr,
    Keyboard,
    Archive,
}

impl Panel {
    /// Get the display name for the panel.
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Dashboard => "Dashboard",
            Panel::Users => "User Registration",
            Panel::Students => "Student Records",
            Panel::Employees => "Employee Records",
            Panel::PdfText => "PDF Text",
            Panel::PdfImages => "PDF Images",
            Panel::Ocr => "Image to Text",
            Panel::Keyboard => "Keyboard Tester",
            Panel::Archive => "Zip Manager",
        }
    }
}

/// Archive operation state.
#[derive(Debug, Clone, Default)]
pub enum ArchiveState {
    #[default]
    Idle,
    InProgress {
        progress: f32,
        message: String,
    },
    Completed(String),
    Error(String),
}

/// Archive progress message from the background task.
pub enum ArchiveProgress {
    Progress { percent: f32, message: String },
    Completed(ArchiveResult),
    Error(String),
}

/// Messages from async tasks to UI.
pub enum UiMessage {
    // Data loading
    CountsLoaded(TableCounts),
    StudentsLoaded(Vec<student::Model>),
    EmployeesLoaded(Vec<employee::Model>),
    LoadError(String),

    // Auth
    UserRegistered(user::Model),
    LoginResult(bool),

    // CRUD operations
    StudentSaved(student::Model),
    StudentDeleted(i32),
    EmployeeSaved(employee::Model),
    EmployeeDeleted(i32),
    OperationFailed(String),

    // Documents
    InvoiceGenerated(PathBuf),
    PdfTextExtracted(String),
    PdfImagesExtracted {
        output_dir: PathBuf,
        images: Vec<ExtractedImage>,
    },
    PdfCombined(PathBuf),
    OcrCompleted(String),
    OcrFailed(String),
}

/// Form state for user registration.
#[derive(Default, Clone)]
pub struct UserForm {
    pub username: String,
    pub password: String,
    pub confirm: String,
}

impl UserForm {
    /// Reset the form to default values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Login form guarding the student records panel.
#[derive(Default, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub in_flight: bool,
    pub failed: bool,
}

/// Form state for student CRUD.
#[derive(Default, Clone)]
pub struct StudentForm {
    pub id: Option<i32>,
    pub student_name: String,
    pub school_name: String,
    pub is_open: bool,
    pub is_editing: bool,
}

impl StudentForm {
    /// Reset the form to default values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Create a form pre-filled for editing an existing student.
    pub fn edit(record: &student::Model) -> Self {
        Self {
            id: Some(record.id),
            student_name: record.student_name.clone(),
            school_name: record.school_name.clone(),
            is_open: true,
            is_editing: true,
        }
    }
}

/// Form state for employee CRUD.
#[derive(Default, Clone)]
pub struct EmployeeForm {
    pub id: Option<i32>,
    pub name: String,
    pub age_input: String,
    pub salary_input: String,
    pub is_open: bool,
    pub is_editing: bool,
}

impl EmployeeForm {
    /// Reset the form to default values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Create a form pre-filled for editing an existing employee.
    pub fn edit(emp: &employee::Model) -> Self {
        Self {
            id: Some(emp.id),
            name: emp.name.clone(),
            age_input: emp.age.to_string(),
            salary_input: emp.salary_display(),
            is_open: true,
            is_editing: true,
        }
    }

    /// Parse the form into validated field values.
    pub fn parse(&self) -> Result<(String, i32, i64), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name is required".to_string());
        }
        let age: i32 = self
            .age_input
            .trim()
            .parse()
            .map_err(|_| "Age must be a whole number".to_string())?;
        if !(0..=150).contains(&age) {
            return Err("Age is out of range".to_string());
        }
        let salary_cents =
            parse_salary_cents(&self.salary_input).ok_or_else(|| "Salary must be a number".to_string())?;
        Ok((name.to_string(), age, salary_cents))
    }
}

/// Log level for UI messages.
#[derive(Clone, Copy, Debug)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Log entry for display in the UI.
#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

/// Target for delete confirmation dialog.
#[derive(Clone)]
pub enum DeleteTarget {
    Student(i32, String),
    Employee(i32, String),
}

/// Main application state.
pub struct App {
    // Runtime and database
    pub rt: tokio::runtime::Runtime,
    pub pool: DatabaseConnection,

    // Message channel for async communication
    pub tx: mpsc::UnboundedSender<UiMessage>,
    pub rx: mpsc::UnboundedReceiver<UiMessage>,

    // Navigation
    pub current_panel: Panel,

    // Cached data
    pub counts: TableCounts,
    pub students: Vec<student::Model>,
    pub employees: Vec<employee::Model>,

    // Forms
    pub user_form: UserForm,
    pub login_form: LoginForm,
    pub student_form: StudentForm,
    pub employee_form: EmployeeForm,

    // Student panel access gate
    pub students_unlocked: bool,

    // Search state
    pub student_search: String,
    pub employee_search: String,

    // PDF text panel
    pub pdf_text_source: Option<PathBuf>,
    pub pdf_text: String,
    pub pdf_text_busy: bool,

    // PDF images panel
    pub pdf_images_source: Option<PathBuf>,
    pub pdf_images_dir: Option<PathBuf>,
    pub pdf_images: Vec<ExtractedImage>,
    pub pdf_images_busy: bool,
    pub combine_selection: Vec<PathBuf>,

    // OCR panel
    pub ocr_selection: Vec<PathBuf>,
    pub ocr_text: String,
    pub ocr_busy: bool,

    // Keyboard tester
    pub keyboard_layout: Vec<Vec<KeyCap>>,
    pub keyboard_state: KeyboardState,

    // Archive panel
    pub archive_items: Vec<PathBuf>,
    pub archive_state: ArchiveState,
    pub archive_listing: Vec<ArchiveEntry>,
    pub archive_listing_source: Option<PathBuf>,
    archive_rx: Option<mpsc::UnboundedReceiver<ArchiveProgress>>,

    // Log messages
    pub log_messages: Vec<LogEntry>,

    // Configuration
    pub config: AppConfig,

    // Dialogs
    pub show_delete_confirm: bool,
    pub delete_target: Option<DeleteTarget>,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

impl App {
    pub fn new(pool: DatabaseConnection, config: AppConfig, rt: tokio::runtime::Runtime) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut app = Self {
            rt,
            pool,
            tx,
            rx,
            current_panel: Panel::default(),
            counts: TableCounts::default(),
            students: Vec::new(),
            employees: Vec::new(),
            user_form: UserForm::default(),
            login_form: LoginForm::default(),
            student_form: StudentForm::default(),
            employee_form: EmployeeForm::default(),
            students_unlocked: false,
            student_search: String::new(),
            employee_search: String::new(),
            pdf_text_source: None,
            pdf_text: String::new(),
            pdf_text_busy: false,
            pdf_images_source: None,
            pdf_images_dir: None,
            pdf_images: Vec::new(),
            pdf_images_busy: false,
            combine_selection: Vec::new(),
            ocr_selection: Vec::new(),
            ocr_text: String::new(),
            ocr_busy: false,
            keyboard_layout: keyboard::layout(),
            keyboard_state: KeyboardState::default(),
            archive_items: Vec::new(),
            archive_state: ArchiveState::default(),
            archive_listing: Vec::new(),
            archive_listing_source: None,
            archive_rx: None,
            log_messages: Vec::new(),
            config,
            show_delete_confirm: false,
            delete_target: None,
            error_message: None,
            success_message: None,
        };

        // Load initial data
        app.load_counts();
        app.load_students();
        app.load_employees();

        app
    }

    /// Log a message to the UI log.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log_messages.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });

        // Keep only last 100 messages
        if self.log_messages.len() > 100 {
            self.log_messages.remove(0);
        }
    }

    /// Log an info message.
    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    /// Log a success message.
    pub fn log_success(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Success, message);
    }

    /// Log an error message.
    pub fn log_error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Clear the activity log.
    pub fn clear_log(&mut self) {
        self.log_messages.clear();
    }

    /// Load table counts for the dashboard.
    pub fn load_counts(&mut self) {
        let pool = self.pool.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match db::connection::get_table_counts(&pool).await {
                Ok(counts) => {
                    let _ = tx.send(UiMessage::CountsLoaded(counts));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    /// Register a new user account.
    pub fn register_user(&mut self, data: CreateUser) {
        let pool = self.pool.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match db::user::register(&pool, data).await {
                Ok(account) => {
                    let _ = tx.send(UiMessage::UserRegistered(account));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    /// Check login credentials for the student records gate.
    pub fn try_login(&mut self) {
        let pool = self.pool.clone();
        let tx = self.tx.clone();
        let username = self.login_form.username.clone();
        let password = self.login_form.password.clone();

        self.login_form.in_flight = true;
        self.login_form.failed = false;

        self.rt.spawn(async move {
            match db::user::verify_login(&pool, &username, &password).await {
                Ok(ok) => {
                    let _ = tx.send(UiMessage::LoginResult(ok));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    /// Load students from database.
    pub fn load_students(&mut self) {
        let pool = self.pool.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match db::student::list_all(&pool).await {
                Ok(records) => {
                    let _ = tx.send(UiMessage::StudentsLoaded(records));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    /// Create a new student record.
    pub fn create_student(&mut self, data: CreateStudent) {
        let pool = self.pool.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match db::student::create(&pool, data).await {
                Ok(record) => {
                    let _ = tx.send(UiMessage::StudentSaved(record));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    /// Update an existing student record.
    pub fn update_student(&mut self, id: i32, data: UpdateStudent) {
        let pool = self.pool.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match db::student::update(&pool, id, data).await {
                Ok(Some(record)) => {
                    let _ = tx.send(UiMessage::StudentSaved(record));
                }
                Ok(None) => {
                    let _ = tx.send(UiMessage::OperationFailed("Student not found".to_string()));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    /// Delete a student record.
    pub fn delete_student(&mut self, id: i32) {
        let pool = self.pool.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match db::student::delete(&pool, id).await {
                Ok(true) => {
                    let _ = tx.send(UiMessage::StudentDeleted(id));
                }
                Ok(false) => {
                    let _ = tx.send(UiMessage::OperationFailed("Student not found".to_string()));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    /// Load employees from database.
    pub fn load_employees(&mut self) {
        let pool = self.pool.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match db::employee::list_all(&pool).await {
                Ok(emps) => {
                    let _ = tx.send(UiMessage::EmployeesLoaded(emps));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    /// Create a new employee.
    pub fn create_employee(&mut self, data: CreateEmployee) {
        let pool = self.pool.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match db::employee::create(&pool, data).await {
                Ok(emp) => {
                    let _ = tx.send(UiMessage::EmployeeSaved(emp));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    /// Update an existing employee.
    pub fn update_employee(&mut self, id: i32, data: UpdateEmployee) {
        let pool = self.pool.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match db::employee::update(&pool, id, data).await {
                Ok(Some(emp)) => {
                    let _ = tx.send(UiMessage::EmployeeSaved(emp));
                }
                Ok(None) => {
                    let _ = tx.send(UiMessage::OperationFailed("Employee not found".to_string()));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    /// Delete an employee.
    pub fn delete_employee(&mut self, id: i32) {
        let pool = self.pool.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match db::employee::delete(&pool, id).await {
                Ok(true) => {
                    let _ = tx.send(UiMessage::EmployeeDeleted(id));
                }
                Ok(false) => {
                    let _ = tx.send(UiMessage::OperationFailed("Employee not found".to_string()));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    /// Generate a PDF invoice for an employee in the configured output
    /// directory.
    pub fn generate_invoice(&mut self, emp: &employee::Model) {
        let tx = self.tx.clone();
        let emp = emp.clone();
        let template_path = self.config.documents.template_path.clone();
        let output_dir = self.config.documents.output_dir.clone();

        self.log_info(format!("Generating invoice for {}", emp.name));

        self.rt.spawn_blocking(move || {
            let result = (|| {
                let template = crate::template::load(&template_path)?;
                let today = Local::now().date_naive();

                let mut values = std::collections::HashMap::new();
                values.insert("INVOICE_NO".to_string(), format!("INV-{:04}", emp.id));
                values.insert("DATE".to_string(), today.to_string());
                values.insert("NAME".to_string(), emp.name.clone());
                values.insert("AGE".to_string(), emp.age.to_string());
                values.insert("SALARY".to_string(), emp.salary_display());

                let text = crate::template::fill(&template, &values);
                let filename = format!("invoice_{:04}_{}.pdf", emp.id, today.format("%Y%m%d"));
                let path = output_dir.join(filename);
                pdf::compose::text_to_pdf(&text, &path)?;
                Ok::<_, crate::AppError>(path)
            })();

            match result {
                Ok(path) => {
                    let _ = tx.send(UiMessage::InvoiceGenerated(path));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(format!("Invoice generation failed: {e}")));
                }
            }
        });
    }

    /// Extract text from a PDF on a background task.
    pub fn extract_pdf_text(&mut self, path: PathBuf) {
        let tx = self.tx.clone();

        self.pdf_text_busy = true;
        self.pdf_text_source = Some(path.clone());
        self.log_info(format!("Extracting text from {}", path.display()));

        self.rt.spawn_blocking(move || match pdf::extract_text(&path) {
            Ok(text) => {
                let _ = tx.send(UiMessage::PdfTextExtracted(text));
            }
            Err(e) => {
                let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
            }
        });
    }

    /// Extract embedded images from a PDF into an output directory.
    pub fn extract_pdf_images(&mut self, path: PathBuf, output_dir: PathBuf) {
        let tx = self.tx.clone();

        self.pdf_images_busy = true;
        self.pdf_images_source = Some(path.clone());
        self.log_info(format!("Extracting images from {}", path.display()));

        self.rt.spawn_blocking(move || match pdf::extract_images(&path, &output_dir) {
            Ok(images) => {
                let _ = tx.send(UiMessage::PdfImagesExtracted { output_dir, images });
            }
            Err(e) => {
                let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
            }
        });
    }

    /// Combine the selected images into a single PDF.
    pub fn combine_images(&mut self, output: PathBuf) {
        let tx = self.tx.clone();
        let images = self.combine_selection.clone();

        self.pdf_images_busy = true;
        self.log_info(format!("Combining {} images into a PDF", images.len()));

        self.rt
            .spawn_blocking(move || match pdf::compose::images_to_pdf(&images, &output) {
                Ok(()) => {
                    let _ = tx.send(UiMessage::PdfCombined(output));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            });
    }

    /// Run OCR over the selected image files.
    pub fn run_ocr(&mut self) {
        let tx = self.tx.clone();
        let paths = self.ocr_selection.clone();
        let ocr_config = self.config.ocr.clone();

        self.ocr_busy = true;
        self.log_info(format!("Recognizing text in {} image(s)", paths.len()));

        self.rt.spawn_blocking(move || {
            let result = OcrEngine::load(&ocr_config).and_then(|mut engine| crate::ocr::recognize_files(&mut engine, &paths));
            match result {
                Ok(text) => {
                    let _ = tx.send(UiMessage::OcrCompleted(text));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OcrFailed(e.to_string()));
                }
            }
        });
    }

    /// Start creating a zip archive from the selected items.
    pub fn start_archive_create(&mut self, dest: PathBuf) {
        let (tx, rx) = mpsc::unbounded_channel();
        self.archive_rx = Some(rx);
        self.archive_state = ArchiveState::InProgress {
            progress: 0.0,
            message: "Starting...".to_string(),
        };

        let items = self.archive_items.clone();

        self.rt.spawn_blocking(move || {
            let progress_tx = tx.clone();
            let result = crate::archive::create_archive(&items, &dest, move |percent, message| {
                let _ = progress_tx.send(ArchiveProgress::Progress {
                    percent,
                    message: message.to_string(),
                });
            });

            match result {
                Ok(outcome) => {
                    let _ = tx.send(ArchiveProgress::Completed(outcome));
                }
                Err(e) => {
                    let _ = tx.send(ArchiveProgress::Error(e.to_string()));
                }
            }
        });
    }

    /// Start extracting a zip archive into a directory.
    pub fn start_archive_extract(&mut self, src: PathBuf, dest: PathBuf) {
        let (tx, rx) = mpsc::unbounded_channel();
        self.archive_rx = Some(rx);
        self.archive_state = ArchiveState::InProgress {
            progress: 0.0,
            message: "Starting...".to_string(),
        };

        self.rt.spawn_blocking(move || {
            let progress_tx = tx.clone();
            let result = crate::archive::extract_archive(&src, &dest, move |percent, message| {
                let _ = progress_tx.send(ArchiveProgress::Progress {
                    percent,
                    message: message.to_string(),
                });
            });

            match result {
                Ok(outcome) => {
                    let _ = tx.send(ArchiveProgress::Completed(outcome));
                }
                Err(e) => {
                    let _ = tx.send(ArchiveProgress::Error(e.to_string()));
                }
            }
        });
    }

    /// List the contents of an archive without extracting it.
    pub fn list_archive(&mut self, src: PathBuf) {
        match crate::archive::list_entries(&src) {
            Ok(entries) => {
                self.log_info(format!("{} entries in {}", entries.len(), src.display()));
                self.archive_listing = entries;
                self.archive_listing_source = Some(src);
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
                self.log_error(e.to_string());
            }
        }
    }

    /// Export student records to CSV via a save dialog.
    pub fn export_students(&mut self) {
        let default_name = crate::export::generate_export_filename("students", "csv");
        let Some(path) = crate::export::show_save_dialog(&default_name, "CSV", &["csv"]) else {
            return;
        };

        match crate::export::export_students_to_csv(&self.students, &path) {
            Ok(()) => {
                self.success_message = Some(format!("Exported to: {}", path.display()));
                self.log_success(format!("Exported students: {}", path.display()));
            }
            Err(e) => {
                self.error_message = Some(format!("Export failed: {e}"));
                self.log_error(format!("Export failed: {e}"));
            }
        }
    }

    /// Export employee records to CSV via a save dialog.
    pub fn export_employees_csv(&mut self) {
        let default_name = crate::export::generate_export_filename("employees", "csv");
        let Some(path) = crate::export::show_save_dialog(&default_name, "CSV", &["csv"]) else {
            return;
        };

        match crate::export::export_employees_to_csv(&self.employees, &path) {
            Ok(()) => {
                self.success_message = Some(format!("Exported to: {}", path.display()));
                self.log_success(format!("Exported employees: {}", path.display()));
            }
            Err(e) => {
                self.error_message = Some(format!("Export failed: {e}"));
                self.log_error(format!("Export failed: {e}"));
            }
        }
    }

    /// Export employee records to Excel via a save dialog.
    pub fn export_employees_excel(&mut self) {
        let default_name = crate::export::generate_export_filename("employees", "xlsx");
        let Some(path) = crate::export::show_save_dialog(&default_name, "Excel", &["xlsx"]) else {
            return;
        };

        match crate::export::export_employees_to_excel(&self.employees, &path) {
            Ok(()) => {
                self.success_message = Some(format!("Exported to: {}", path.display()));
                self.log_success(format!("Exported employees: {}", path.display()));
            }
            Err(e) => {
                self.error_message = Some(format!("Export failed: {e}"));
                self.log_error(format!("Export failed: {e}"));
            }
        }
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        // Poll UiMessage channel
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::CountsLoaded(counts) => {
                    self.counts = counts;
                }
                UiMessage::StudentsLoaded(records) => {
                    self.students = records;
                }
                UiMessage::EmployeesLoaded(emps) => {
                    self.employees = emps;
                }
                UiMessage::LoadError(e) => {
                    self.error_message = Some(e.clone());
                    self.log_error(e);
                }
                UiMessage::UserRegistered(account) => {
                    self.success_message = Some(format!("User '{}' registered", account.username));
                    self.log_success(format!("Registered user '{}'", account.username));
                    self.user_form.reset();
                    self.load_counts();
                }
                UiMessage::LoginResult(ok) => {
                    self.login_form.in_flight = false;
                    if ok {
                        self.students_unlocked = true;
                        self.log_success(format!("Login: {}", self.login_form.username));
                        self.login_form.password.clear();
                        self.login_form.failed = false;
                    } else {
                        self.login_form.failed = true;
                        self.log_error("Login failed: invalid credentials");
                    }
                }
                UiMessage::StudentSaved(record) => {
                    self.success_message = Some(format!("Student '{}' saved", record.student_name));
                    self.student_form.reset();
                    self.load_students();
                    self.load_counts();
                }
                UiMessage::StudentDeleted(id) => {
                    self.students.retain(|s| s.id != id);
                    self.success_message = Some("Student deleted".to_string());
                    self.log_success("Student deleted");
                    self.load_counts();
                }
                UiMessage::EmployeeSaved(emp) => {
                    self.success_message = Some(format!("Employee '{}' saved", emp.name));
                    self.employee_form.reset();
                    self.load_employees();
                    self.load_counts();
                }
                UiMessage::EmployeeDeleted(id) => {
                    self.employees.retain(|e| e.id != id);
                    self.success_message = Some("Employee deleted".to_string());
                    self.log_success("Employee deleted");
                    self.load_counts();
                }
                UiMessage::OperationFailed(e) => {
                    self.pdf_text_busy = false;
                    self.pdf_images_busy = false;
                    self.login_form.in_flight = false;
                    self.error_message = Some(e.clone());
                    self.log_error(e);
                }
                UiMessage::InvoiceGenerated(path) => {
                    self.success_message = Some(format!("Invoice written to {}", path.display()));
                    self.log_success(format!("Invoice generated: {}", path.display()));
                }
                UiMessage::PdfTextExtracted(text) => {
                    self.pdf_text_busy = false;
                    self.log_success(format!("Extracted {} characters of text", text.len()));
                    self.pdf_text = text;
                }
                UiMessage::PdfImagesExtracted { output_dir, images } => {
                    self.pdf_images_busy = false;
                    if images.is_empty() {
                        self.log_info("No embedded images found");
                    } else {
                        self.log_success(format!(
                            "Extracted {} image(s) into {}",
                            images.len(),
                            output_dir.display()
                        ));
                    }
                    self.pdf_images_dir = Some(output_dir);
                    self.pdf_images = images;
                }
                UiMessage::PdfCombined(path) => {
                    self.pdf_images_busy = false;
                    self.success_message = Some(format!("PDF written to {}", path.display()));
                    self.log_success(format!("Combined PDF: {}", path.display()));
                }
                UiMessage::OcrCompleted(text) => {
                    self.ocr_busy = false;
                    self.log_success("Text recognition finished");
                    self.ocr_text = text;
                }
                UiMessage::OcrFailed(e) => {
                    self.ocr_busy = false;
                    self.error_message = Some(e.clone());
                    self.log_error(e);
                }
            }
        }

        // Poll archive progress
        if let Some(mut rx) = self.archive_rx.take() {
            let mut done = false;
            while let Ok(progress) = rx.try_recv() {
                match progress {
                    ArchiveProgress::Progress { percent, message } => {
                        self.archive_state = ArchiveState::InProgress {
                            progress: percent,
                            message,
                        };
                    }
                    ArchiveProgress::Completed(outcome) => {
                        let summary = outcome.summary();
                        self.archive_state = ArchiveState::Completed(summary.clone());
                        self.log_success(summary);
                        done = true;
                    }
                    ArchiveProgress::Error(e) => {
                        self.archive_state = ArchiveState::Error(e.clone());
                        self.log_error(e);
                        done = true;
                    }
                }
            }
            if !done {
                self.archive_rx = Some(rx);
            }
        }
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.disable();
                ui.horizontal(|ui| {
                    ui.colored_label(colors::NEUTRAL, self.current_panel.name());

                    let busy = self.pdf_text_busy || self.pdf_images_busy || self.ocr_busy;
                    if busy {
                        ui.spinner();
                        ui.colored_label(colors::WARNING, "Working...");
                    }

                    // Progress bar (right side)
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let ArchiveState::InProgress { progress, message } = &self.archive_state {
                            ui.add(
                                ProgressBar::new(*progress)
                                    .desired_width(250.0)
                                    .text(message)
                                    .animate(true),
                            );
                        }
                    });
                });
            });
    }

    /// Render modal dialogs (error, success, delete confirmation).
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        // Error dialog
        if let Some(ref error) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, error);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        // Success dialog
        if let Some(ref msg) = self.success_message.clone() {
            egui::Window::new("Success")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::SUCCESS, msg);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.success_message = None;
                    }
                });
        }

        // Delete confirmation dialog
        if self.show_delete_confirm
            && let Some(ref target) = self.delete_target.clone()
        {
            let (title, message) = match target {
                DeleteTarget::Student(_, name) => ("Delete Student", format!("Delete student '{}'?", name)),
                DeleteTarget::Employee(_, name) => ("Delete Employee", format!("Delete employee '{}'?", name)),
            };

            egui::Window::new(title)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        if ui.button("Cancel").clicked() {
                            self.show_delete_confirm = false;
                            self.delete_target = None;
                        }
                        if ui.button("Delete").clicked() {
                            self.confirm_delete();
                            self.show_delete_confirm = false;
                            self.delete_target = None;
                        }
                    });
                });
        }
    }

    /// Execute the confirmed delete operation.
    fn confirm_delete(&mut self) {
        if let Some(target) = self.delete_target.take() {
            match target {
                DeleteTarget::Student(id, name) => {
                    self.log_info(format!("Deleting student: {}", name));
                    self.delete_student(id);
                }
                DeleteTarget::Employee(id, name) => {
                    self.log_info(format!("Deleting employee: {}", name));
                    self.delete_employee(id);
                }
            }
        }
    }

    /// Queue a delete, honoring the confirm-deletes setting.
    pub fn request_delete(&mut self, target: DeleteTarget) {
        if self.config.ui.confirm_deletes {
            self.delete_target = Some(target);
            self.show_delete_confirm = true;
        } else {
            self.delete_target = Some(target);
            self.confirm_delete();
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();

        // Request repaint during async operations
        if self.pdf_text_busy
            || self.pdf_images_busy
            || self.ocr_busy
            || self.login_form.in_flight
            || matches!(self.archive_state, ArchiveState::InProgress { .. })
        {
            ctx.request_repaint();
        }

        // Status bar
        self.show_status_bar(ctx);

        // Modal dialogs (error, success, delete confirmation)
        self.show_dialogs(ctx);

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| match self.current_panel {
            Panel::Dashboard => {
                if let Some(next) = dashboard::show(self, ui) {
                    self.current_panel = next;
                }
            }
            Panel::Users => {
                if users_panel::show(self, ui) {
                    self.current_panel = Panel::Dashboard;
                }
            }
            Panel::Students => {
                if students_panel::show(self, ui) {
                    self.current_panel = Panel::Dashboard;
                }
            }
            Panel::Employees => {
                if employees_panel::show(self, ui) {
                    self.current_panel = Panel::Dashboard;
                }
            }
            Panel::PdfText => {
                if pdf_text_panel::show(self, ui) {
                    self.current_panel = Panel::Dashboard;
                }
            }
            Panel::PdfImages => {
                if pdf_images_panel::show(self, ui) {
                    self.current_panel = Panel::Dashboard;
                }
            }
            Panel::Ocr => {
                if ocr_panel::show(self, ui) {
                    self.current_panel = Panel::Dashboard;
                }
            }
            Panel::Keyboard => {
                if keyboard_panel::show(self, ui) {
                    self.current_panel = Panel::Dashboard;
                }
            }
            Panel::Archive => {
                if archive_panel::show(self, ui) {
                    self.current_panel = Panel::Dashboard;
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::test_db;

    fn test_app() -> App {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let pool = rt.block_on(test_db());
        App::new(pool, AppConfig::default(), rt)
    }

    #[test]
    fn test_failed_login_task_leaves_form_ready_for_retry() {
        let mut app = test_app();
        app.login_form.in_flight = true;

        // A database failure during login is reported as a generic
        // operation failure, not a LoginResult.
        app.tx
            .send(UiMessage::OperationFailed("Database error: locked".to_string()))
            .unwrap();
        app.poll_async_results();

        assert!(!app.login_form.in_flight);
        assert!(!app.students_unlocked);
        assert!(app.error_message.is_some());
    }

    #[test]
    fn test_rejected_login_clears_in_flight_and_flags_failure() {
        let mut app = test_app();
        app.login_form.in_flight = true;

        app.tx.send(UiMessage::LoginResult(false)).unwrap();
        app.poll_async_results();

        assert!(!app.login_form.in_flight);
        assert!(app.login_form.failed);
        assert!(!app.students_unlocked);
    }
}
