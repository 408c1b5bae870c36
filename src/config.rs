use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub routes: RouteConfig,
    pub policy: PolicyConfig,
}

/// 提交成功后跳转的列表页路由
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    pub purchase_order_list: String,
    pub sales_record_list: String,
}

/// 业务策略开关
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// 库存上限是否作为提交硬校验 (默认关闭, 仅做行内提示)
    pub enforce_stock_limit: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            routes: RouteConfig {
                purchase_order_list: "/order/list".to_string(),
                sales_record_list: "/sales/list".to_string(),
            },
            policy: PolicyConfig {
                enforce_stock_limit: false,
            },
        }
    }
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self {
            routes: RouteConfig {
                purchase_order_list: std::env::var("ROUTE_ORDER_LIST")
                    .unwrap_or_else(|_| "/order/list".to_string()),
                sales_record_list: std::env::var("ROUTE_SALES_LIST")
                    .unwrap_or_else(|_| "/sales/list".to_string()),
            },
            policy: PolicyConfig {
                enforce_stock_limit: std::env::var("ENFORCE_STOCK_LIMIT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(false),
            },
        }
    }

    /// 指定单据类型对应的列表页路由
    pub fn list_route(&self, kind: crate::models::DocumentKind) -> &str {
        match kind {
            crate::models::DocumentKind::PurchaseOrder => &self.routes.purchase_order_list,
            crate::models::DocumentKind::SalesRecord => &self.routes.sales_record_list,
        }
    }
}
