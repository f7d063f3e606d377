//! CSV menu import
//!
//! Expected header (any column order, case-insensitive):
//! `category, is_veg, name, description, price, is_jain, is_chefs_special,
//! cooking_time_minutes`. Only `name` and `price` are mandatory. Each data
//! row is validated and created on its own; failures are reported per row
//! and do not stop the import.

use csv::{ReaderBuilder, StringRecord, Trim};
use shared::models::{ImportReport, ImportRowResult, MenuItemCreate};
use sqlx::SqlitePool;

use crate::db::repository::{category, menu_item};
use crate::services::catalog::validate_new_item;
use crate::utils::money::parse_price;
use crate::utils::{AppError, AppResult, ErrorCode};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSV boolean cell: case-insensitive `"true"` is true, anything else
/// (including empty, `yes`, `1`) is false.
pub fn parse_bool(token: &str) -> bool {
    token.trim().eq_ignore_ascii_case("true")
}

/// Column positions resolved from the header row
#[derive(Debug)]
struct Columns {
    category: Option<usize>,
    is_veg: Option<usize>,
    name: usize,
    description: Option<usize>,
    price: usize,
    is_jain: Option<usize>,
    is_chefs_special: Option<usize>,
    cooking_time_minutes: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> AppResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::ImportFileInvalid,
                    format!("CSV header is missing the '{name}' column"),
                )
                .with_detail("column", name)
            })
        };
        Ok(Self {
            category: find("category"),
            is_veg: find("is_veg"),
            name: require("name")?,
            description: find("description"),
            price: require("price")?,
            is_jain: find("is_jain"),
            is_chefs_special: find("is_chefs_special"),
            cooking_time_minutes: find("cooking_time_minutes"),
        })
    }
}

fn cell(record: &StringRecord, index: Option<usize>) -> &str {
    index.and_then(|i| record.get(i)).unwrap_or("").trim()
}

/// One parsed data row
#[derive(Debug)]
struct ImportRow {
    category: Option<String>,
    item: MenuItemCreate,
}

fn parse_row(record: &StringRecord, columns: &Columns) -> AppResult<ImportRow> {
    let is_veg = parse_bool(cell(record, columns.is_veg));
    let cooking_time_minutes = match cell(record, columns.cooking_time_minutes) {
        "" => None,
        raw => Some(raw.parse::<i32>().map_err(|_| {
            AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("cooking_time_minutes '{raw}' is not a whole number"),
            )
            .with_detail("field", "cooking_time_minutes")
        })?),
    };
    let description = Some(cell(record, columns.description))
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let category = Some(cell(record, columns.category))
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(ImportRow {
        category,
        item: MenuItemCreate {
            category_id: None,
            name: cell(record, Some(columns.name)).to_string(),
            description,
            price: parse_price(cell(record, Some(columns.price)))?,
            image: None,
            is_veg: Some(is_veg),
            // Rows not marked veg are treated as non-veg
            is_non_veg: Some(!is_veg),
            is_jain: Some(parse_bool(cell(record, columns.is_jain))),
            is_chefs_special: Some(parse_bool(cell(record, columns.is_chefs_special))),
            cooking_time_minutes,
        },
    })
}

async fn import_row(
    pool: &SqlitePool,
    restaurant_id: i64,
    record: &StringRecord,
    columns: &Columns,
) -> AppResult<i64> {
    let row = parse_row(record, columns)?;
    let mut data = validate_new_item(row.item)?;
    // Categories are only created for rows that will be imported
    if let Some(name) = row.category {
        data.category_id = Some(category::get_or_create(pool, restaurant_id, &name).await?.id);
    }
    let item = menu_item::create(pool, restaurant_id, data).await?;
    Ok(item.id)
}

/// Import menu items from CSV bytes
pub async fn import_items(pool: &SqlitePool, restaurant_id: i64, data: &[u8]) -> AppResult<ImportReport> {
    if data.is_empty() {
        return Err(AppError::with_message(ErrorCode::ImportFileInvalid, "Uploaded file is empty"));
    }
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(data);
    let headers = reader.headers().map_err(|e| {
        AppError::with_message(ErrorCode::ImportFileInvalid, format!("Unreadable CSV header: {e}"))
    })?;
    let columns = Columns::from_headers(headers)?;

    let mut report = ImportReport::default();
    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let outcome = match record {
            Ok(record) => import_row(pool, restaurant_id, &record, &columns).await,
            Err(e) => Err(AppError::with_message(
                ErrorCode::ImportFileInvalid,
                format!("Unreadable row: {e}"),
            )),
        };
        match outcome {
            Ok(item_id) => {
                report.created += 1;
                report.rows.push(ImportRowResult {
                    row,
                    success: true,
                    item_id: Some(item_id),
                    error: None,
                });
            }
            Err(e) => {
                if e.is_system() {
                    tracing::error!(restaurant_id, row, error = %e, "Menu import row failed");
                } else {
                    tracing::debug!(restaurant_id, row, error = %e, "Menu import row skipped");
                }
                report.failed += 1;
                report.rows.push(ImportRowResult {
                    row,
                    success: false,
                    item_id: None,
                    error: Some(e.message),
                });
            }
        }
    }

    report.message = format!("{} items uploaded successfully", report.created);
    tracing::info!(
        restaurant_id,
        created = report.created,
        failed = report.failed,
        "Menu CSV imported"
    );
    Ok(report)
}
