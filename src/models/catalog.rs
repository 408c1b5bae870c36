use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// 商品 (只读目录数据)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub code: String,       // 商品编码
    pub size: String,       // 规格
    pub unit_price: BigDecimal,
    pub count: i64,         // 当前库存数量
    pub active: bool,
}

/// 客户 (只读目录数据)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub active: bool,
}

/// 目录快照 - 打开录入界面时由外部协作者提供, 界面生命周期内只读
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
}

impl CatalogSnapshot {
    pub fn new(products: Vec<Product>, customers: Vec<Customer>) -> Self {
        Self { products, customers }
    }

    /// 按ID查找商品
    pub fn product(&self, product_id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// 按ID查找客户
    pub fn customer(&self, customer_id: i64) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == customer_id)
    }

    /// 在售商品列表
    pub fn active_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.active)
    }

    /// 有效客户列表
    pub fn active_customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter().filter(|c| c.active)
    }
}
