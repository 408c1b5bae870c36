use bigdecimal::{BigDecimal, Zero};
use indexmap::IndexMap;

use crate::models::{LineItem, Product};

/// 明细行集合 - 按商品ID去重, 保持选入顺序
///
/// 同一商品最多出现一行; 删除用 shift_remove, 其余行的顺序不变。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItemSet {
    items: IndexMap<i64, LineItem>,
}

impl LineItemSet {
    pub fn new() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }

    /// 选入商品。已存在则不做任何事 (幂等), 否则追加数量为 0 的新行。
    pub fn add(&mut self, product: Product) {
        if self.items.contains_key(&product.id) {
            return;
        }
        self.items.insert(product.id, LineItem::new(product));
    }

    /// 移除指定商品的明细行, 不存在则不做任何事
    pub fn remove(&mut self, product_id: i64) {
        self.items.shift_remove(&product_id);
    }

    /// 目录行上的勾选开关: 已选则移除, 未选则选入
    pub fn toggle(&mut self, product: Product) {
        if self.items.contains_key(&product.id) {
            self.items.shift_remove(&product.id);
        } else {
            self.items.insert(product.id, LineItem::new(product));
        }
    }

    /// 写入第 index 行的数量 (界面原始输入)
    ///
    /// 非数字或负数归一为 0; 超出库存照常记录, 校验在提交阶段处理。
    /// index 越界时返回 false。
    pub fn set_amount(&mut self, index: usize, raw: &str) -> bool {
        let Some((_, item)) = self.items.get_index_mut(index) else {
            return false;
        };
        item.set_amount(normalize_amount(raw));
        true
    }

    /// 编辑模式回填: 直接写入已持久化的数量
    pub fn push_with_amount(&mut self, product: Product, amount: BigDecimal) {
        let id = product.id;
        if self.items.contains_key(&id) {
            return;
        }
        let mut item = LineItem::new(product);
        item.set_amount(normalize_value(amount));
        self.items.insert(id, item);
    }

    /// 小计 = 所有行金额之和, 每次读取现算, 不做缓存
    pub fn sub_total(&self) -> BigDecimal {
        self.items
            .values()
            .fold(BigDecimal::zero(), |acc, it| acc + &it.line_total)
    }

    /// 数量超出库存的商品ID列表 (行内提示用)
    pub fn over_stock(&self) -> Vec<i64> {
        self.items
            .values()
            .filter(|it| it.exceeds_stock())
            .map(|it| it.product.id)
            .collect()
    }

    pub fn contains(&self, product_id: i64) -> bool {
        self.items.contains_key(&product_id)
    }

    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get_index(index).map(|(_, it)| it)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// 界面原始输入归一: 非数字 -> 0, 负数 -> 0
pub fn normalize_amount(raw: &str) -> BigDecimal {
    match raw.trim().parse::<BigDecimal>() {
        Ok(v) => normalize_value(v),
        Err(_) => BigDecimal::zero(),
    }
}

fn normalize_value(v: BigDecimal) -> BigDecimal {
    if v < BigDecimal::zero() {
        BigDecimal::zero()
    } else {
        v
    }
}
