//! Order Store
//! Mission: Persist order documents with embedded items

use crate::models::{CreateOrderRequest, Order, OrderItem, OrderStatus, ShippingAddress};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection};
use uuid::Uuid;

/// Order storage with SQLite backend.
///
/// Items and shipping address are nested documents; they persist as JSON
/// text columns rather than joined tables.
pub struct OrderStore {
    db_path: String,
}

impl OrderStore {
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS orders (
                id TEXT PRIMARY KEY,
                user_id TEXT,
                order_items TEXT NOT NULL,
                shipping_address TEXT,
                payment_method TEXT,
                total_price REAL NOT NULL,
                status TEXT NOT NULL,
                is_paid INTEGER NOT NULL DEFAULT 0,
                paid_at TEXT,
                is_delivered INTEGER NOT NULL DEFAULT 0,
                delivered_at TEXT,
                created_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    pub fn create(&self, req: &CreateOrderRequest) -> Result<Order> {
        let order = Order {
            id: Uuid::new_v4(),
            user: req.user,
            order_items: req.order_items.clone(),
            shipping_address: req.shipping_address.clone(),
            payment_method: req.payment_method.clone(),
            total_price: req.total_price,
            status: OrderStatus::Pending,
            is_paid: false,
            paid_at: None,
            is_delivered: false,
            delivered_at: None,
            created_at: Utc::now().to_rfc3339(),
        };

        let items_json =
            serde_json::to_string(&order.order_items).context("Failed to encode order items")?;
        let address_json = order
            .shipping_address
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .context("Failed to encode shipping address")?;

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO orders (id, user_id, order_items, shipping_address, payment_method,
                                 total_price, status, is_paid, paid_at, is_delivered,
                                 delivered_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                order.id.to_string(),
                order.user.map(|u| u.to_string()),
                items_json,
                address_json,
                order.payment_method,
                order.total_price,
                order.status.as_str(),
                order.is_paid,
                order.paid_at,
                order.is_delivered,
                order.delivered_at,
                order.created_at,
            ],
        )
        .context("Failed to insert order")?;

        Ok(order)
    }

    pub fn get(&self, id: &Uuid) -> Result<Option<Order>> {
        let conn = Connection::open(&self.db_path)?;
        let mut stmt = conn.prepare(&format!("{SELECT_ORDER} WHERE id = ?1"))?;

        match stmt.query_row(params![id.to_string()], Self::map_row) {
            Ok(order) => Ok(Some(order)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List orders, newest first, optionally filtered to one user.
    pub fn list(&self, user: Option<&Uuid>) -> Result<Vec<Order>> {
        let conn = Connection::open(&self.db_path)?;

        let orders = match user {
            Some(user_id) => {
                let mut stmt = conn.prepare(&format!(
                    "{SELECT_ORDER} WHERE user_id = ?1 ORDER BY created_at DESC"
                ))?;
                let rows = stmt.query_map(params![user_id.to_string()], Self::map_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt =
                    conn.prepare(&format!("{SELECT_ORDER} ORDER BY created_at DESC"))?;
                let rows = stmt.query_map([], Self::map_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(orders)
    }

    /// Mark an order paid and move it to `processing`.
    pub fn mark_paid(&self, id: &Uuid) -> Result<Option<Order>> {
        let conn = Connection::open(&self.db_path)?;
        let updated = conn.execute(
            "UPDATE orders SET is_paid = 1, paid_at = ?1, status = ?2 WHERE id = ?3",
            params![
                Utc::now().to_rfc3339(),
                OrderStatus::Processing.as_str(),
                id.to_string()
            ],
        )?;

        if updated == 0 {
            return Ok(None);
        }
        self.get(id)
    }

    /// Set the order status; `delivered` also stamps the delivery fields.
    pub fn set_status(&self, id: &Uuid, status: OrderStatus) -> Result<Option<Order>> {
        let conn = Connection::open(&self.db_path)?;

        let updated = if status == OrderStatus::Delivered {
            conn.execute(
                "UPDATE orders SET status = ?1, is_delivered = 1, delivered_at = ?2 WHERE id = ?3",
                params![status.as_str(), Utc::now().to_rfc3339(), id.to_string()],
            )?
        } else {
            conn.execute(
                "UPDATE orders SET status = ?1 WHERE id = ?2",
                params![status.as_str(), id.to_string()],
            )?
        };

        if updated == 0 {
            return Ok(None);
        }
        self.get(id)
    }

    /// Remove every order. Used by the seed binary.
    pub fn clear(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute("DELETE FROM orders", [])?;
        Ok(())
    }

    fn map_row(row: &rusqlite::Row) -> rusqlite::Result<Order> {
        let items_json: String = row.get(2)?;
        let address_json: Option<String> = row.get(3)?;
        let status_str: String = row.get(6)?;

        let order_items: Vec<OrderItem> = serde_json::from_str(&items_json).unwrap_or_default();
        let shipping_address: Option<ShippingAddress> = address_json
            .as_deref()
            .and_then(|json| serde_json::from_str(json).ok());

        Ok(Order {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap(),
            user: row
                .get::<_, Option<String>>(1)?
                .and_then(|s| Uuid::parse_str(&s).ok()),
            order_items,
            shipping_address,
            payment_method: row.get(4)?,
            total_price: row.get(5)?,
            status: OrderStatus::from_str(&status_str).unwrap_or(OrderStatus::Pending),
            is_paid: row.get(7)?,
            paid_at: row.get(8)?,
            is_delivered: row.get(9)?,
            delivered_at: row.get(10)?,
            created_at: row.get(11)?,
        })
    }
}

const SELECT_ORDER: &str = "SELECT id, user_id, order_items, shipping_address, payment_method,
                                   total_price, status, is_paid, paid_at, is_delivered,
                                   delivered_at, created_at
                            FROM orders";
