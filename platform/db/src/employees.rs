//! Employee data service.
//!
//! Request handlers talk to [`EmployeeService`]; [`DbEmployeeService`] is the
//! sea-orm implementation used in production.

use async_trait::async_trait;
use chrono::Utc;
use entity::employees;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use tracing::{debug, info};

use crate::{DbError, DbPool, DbResult};

pub type Employee = employees::Model;

/// Descriptive fields shared by inserts and updates, already validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployeeFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// A save request: either a new record or an overwrite of an existing one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveEmployee {
    Create(EmployeeFields),
    Update { id: i32, fields: EmployeeFields },
}

#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// Every employee, ordered by last name.
    async fn find_all(&self) -> DbResult<Vec<Employee>>;

    async fn find_by_id(&self, id: i32) -> DbResult<Employee>;

    /// Insert or update, returning the stored row.
    async fn save(&self, request: SaveEmployee) -> DbResult<Employee>;

    async fn delete_by_id(&self, id: i32) -> DbResult<()>;

    /// Case-insensitive substring match on first or last name. A blank
    /// name returns the full list.
    async fn search_by(&self, name: &str) -> DbResult<Vec<Employee>>;

    async fn count(&self) -> DbResult<u64>;

    async fn ping(&self) -> DbResult<()>;
}

#[derive(Clone)]
pub struct DbEmployeeService {
    pool: DbPool,
}

impl DbEmployeeService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, fields: EmployeeFields) -> DbResult<Employee> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let record = employees::ActiveModel {
            first_name: Set(fields.first_name),
            last_name: Set(fields.last_name),
            email: Set(fields.email),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        info!(employee_id = record.id, "employee created");
        Ok(record)
    }

    async fn update(&self, id: i32, fields: EmployeeFields) -> DbResult<Employee> {
        let existing = self.find_by_id(id).await?;
        let mut active: employees::ActiveModel = existing.into();
        active.first_name = Set(fields.first_name);
        active.last_name = Set(fields.last_name);
        active.email = Set(fields.email);
        active.updated_at = Set(Utc::now().into());
        let record = active.update(&self.pool).await?;
        info!(employee_id = record.id, "employee updated");
        Ok(record)
    }
}

#[async_trait]
impl EmployeeService for DbEmployeeService {
    async fn find_all(&self) -> DbResult<Vec<Employee>> {
        let records = employees::Entity::find()
            .order_by_asc(employees::Column::LastName)
            .order_by_asc(employees::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn find_by_id(&self, id: i32) -> DbResult<Employee> {
        employees::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or(DbError::NotFound(id))
    }

    async fn save(&self, request: SaveEmployee) -> DbResult<Employee> {
        match request {
            SaveEmployee::Create(fields) => self.insert(fields).await,
            SaveEmployee::Update { id, fields } => self.update(id, fields).await,
        }
    }

    async fn delete_by_id(&self, id: i32) -> DbResult<()> {
        let result = employees::Entity::delete_by_id(id)
            .exec(&self.pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(DbError::NotFound(id));
        }
        info!(employee_id = id, "employee deleted");
        Ok(())
    }

    async fn search_by(&self, name: &str) -> DbResult<Vec<Employee>> {
        let needle = name.trim();
        if needle.is_empty() {
            return self.find_all().await;
        }
        let pattern = format!("%{}%", escape_like(needle));
        debug!(%pattern, "searching employees");
        let records = employees::Entity::find()
            .filter(
                Condition::any()
                    .add(lower_like(employees::Column::FirstName, &pattern))
                    .add(lower_like(employees::Column::LastName, &pattern)),
            )
            .order_by_asc(employees::Column::LastName)
            .order_by_asc(employees::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn count(&self) -> DbResult<u64> {
        Ok(employees::Entity::find().count(&self.pool).await?)
    }

    async fn ping(&self) -> DbResult<()> {
        Ok(self.pool.ping().await?)
    }
}

const LIKE_ESCAPE: char = '!';

/// `LOWER(column) LIKE LOWER(pattern)`. Both sides are folded by the same
/// database function so non-ASCII text compares consistently.
fn lower_like(column: employees::Column, pattern: &str) -> SimpleExpr {
    Expr::cust_with_exprs(
        format!("LOWER($1) LIKE LOWER($2) ESCAPE '{LIKE_ESCAPE}'"),
        [Expr::col(column).into(), Expr::val(pattern).into()],
    )
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, LIKE_ESCAPE | '%' | '_') {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

/// Demo roster inserted by `seed` when the table is empty.
const DEMO_ROSTER: &[(&str, &str, &str)] = &[
    ("Leslie", "Andrews", "leslie@example.com"),
    ("Emma", "Baumgarten", "emma@example.com"),
    ("Avani", "Gupta", "avani@example.com"),
    ("Yuri", "Petrov", "yuri@example.com"),
    ("Juan", "Vega", "juan@example.com"),
];

/// Insert the demo roster unless employees already exist. Returns the number
/// of rows inserted.
pub async fn seed_demo_roster(service: &dyn EmployeeService) -> DbResult<usize> {
    if service.count().await? > 0 {
        info!("employees already present; skipping seed");
        return Ok(0);
    }
    for (first_name, last_name, email) in DEMO_ROSTER {
        service
            .save(SaveEmployee::Create(EmployeeFields {
                first_name: (*first_name).to_string(),
                last_name: (*last_name).to_string(),
                email: (*email).to_string(),
            }))
            .await?;
    }
    Ok(DEMO_ROSTER.len())
}
