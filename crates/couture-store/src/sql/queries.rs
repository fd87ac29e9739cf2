//! SQL queries for different databases.

/// Table creation (PostgreSQL).
pub const CREATE_TABLE_PG: &str = r#"
CREATE TABLE IF NOT EXISTS clients (
    id VARCHAR(64) PRIMARY KEY,
    name TEXT NOT NULL,
    phone TEXT NOT NULL,
    description TEXT NOT NULL,
    measurements TEXT NOT NULL,
    specific_measurements TEXT,
    price BIGINT NOT NULL,
    fabric_photo TEXT,
    date TEXT NOT NULL,
    delivered BOOLEAN NOT NULL DEFAULT FALSE,
    archived BOOLEAN NOT NULL DEFAULT FALSE
)
"#;

/// Table creation (MySQL). Photos may be inline data URIs, hence LONGTEXT.
pub const CREATE_TABLE_MYSQL: &str = r#"
CREATE TABLE IF NOT EXISTS clients (
    id VARCHAR(64) PRIMARY KEY,
    name TEXT NOT NULL,
    phone TEXT NOT NULL,
    description TEXT NOT NULL,
    measurements TEXT NOT NULL,
    specific_measurements TEXT,
    price BIGINT NOT NULL,
    fabric_photo LONGTEXT,
    date VARCHAR(64) NOT NULL,
    delivered BOOLEAN NOT NULL DEFAULT FALSE,
    archived BOOLEAN NOT NULL DEFAULT FALSE
)
"#;

/// Table creation (SQLite). Flags are INTEGER: the `Any` driver cannot decode SQLite `BOOLEAN`.
pub const CREATE_TABLE_SQLITE: &str = r#"
CREATE TABLE IF NOT EXISTS clients (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    phone TEXT NOT NULL,
    description TEXT NOT NULL,
    measurements TEXT NOT NULL,
    specific_measurements TEXT,
    price INTEGER NOT NULL,
    fabric_photo TEXT,
    date TEXT NOT NULL,
    delivered INTEGER NOT NULL DEFAULT 0,
    archived INTEGER NOT NULL DEFAULT 0
)
"#;

/// Load every row. Ids are millisecond timestamps, so id order is creation order.
pub const SELECT_ALL: &str = r#"
SELECT id, name, phone, description, measurements, specific_measurements,
       price, fabric_photo, date, delivered, archived
FROM clients
ORDER BY id
"#;

/// Find one row by id (PostgreSQL).
pub const SELECT_ONE_PG: &str = r#"
SELECT id, name, phone, description, measurements, specific_measurements,
       price, fabric_photo, date, delivered, archived
FROM clients
WHERE id = $1
"#;

/// Find one row by id (MySQL/SQLite).
pub const SELECT_ONE_MYSQL: &str = r#"
SELECT id, name, phone, description, measurements, specific_measurements,
       price, fabric_photo, date, delivered, archived
FROM clients
WHERE id = ?
"#;

/// Insert a row (PostgreSQL).
pub const INSERT_PG: &str = r#"
INSERT INTO clients (id, name, phone, description, measurements, specific_measurements,
                     price, fabric_photo, date, delivered, archived)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
"#;

/// Insert a row (MySQL/SQLite).
pub const INSERT_MYSQL: &str = r#"
INSERT INTO clients (id, name, phone, description, measurements, specific_measurements,
                     price, fabric_photo, date, delivered, archived)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

/// Write back every mutable column (PostgreSQL). `id` and `date` never change.
pub const UPDATE_PG: &str = r#"
UPDATE clients
SET name = $1, phone = $2, description = $3, measurements = $4,
    specific_measurements = $5, price = $6, fabric_photo = $7,
    delivered = $8, archived = $9
WHERE id = $10
"#;

/// Write back every mutable column (MySQL/SQLite).
pub const UPDATE_MYSQL: &str = r#"
UPDATE clients
SET name = ?, phone = ?, description = ?, measurements = ?,
    specific_measurements = ?, price = ?, fabric_photo = ?,
    delivered = ?, archived = ?
WHERE id = ?
"#;

/// Delete a row (PostgreSQL).
pub const DELETE_PG: &str = "DELETE FROM clients WHERE id = $1";

/// Delete a row (MySQL/SQLite).
pub const DELETE_MYSQL: &str = "DELETE FROM clients WHERE id = ?";
