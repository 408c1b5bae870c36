use thiserror::Error;

/// 本地校验失败 - 不发起任何网络调用, 界面留在原地
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("请选择客户")]
    MissingCustomer,
    #[error("请填写单据日期")]
    MissingDate,
    #[error("请至少选择一个商品")]
    EmptyLineItems,
    #[error("商品 {product_name} 的数量必须大于 0")]
    NonPositiveAmount { product_name: String },
    #[error("商品 {product_name} 的数量超出库存")]
    StockExceeded { product_name: String },
    #[error("单据内容没有变化")]
    NoChanges,
}

/// 引擎级错误
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// 目录或单据查询失败 (编辑界面无法打开)
    #[error("remote fetch failed: {0}")]
    Remote(String),
}
