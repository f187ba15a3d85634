use tandem_core::store::error::StoreError;
use tandem_core::store::port::{Query, SqlValue};

/// # Summary
/// 改写后的查询：SQL 中的 `$name` 已替换为 `?N`，`values[N-1]` 为对应取值。
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalQuery {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

/// # Summary
/// 将命名占位符改写为 SQLite 编号参数。
///
/// # Logic
/// 1. 逐字符扫描 SQL，跳过单引号字符串与双引号标识符内部的内容。
/// 2. 遇到 `$name` 时在参数表中查找同名参数，按首次出现顺序分配编号。
/// 3. 同名占位符重复出现时复用同一编号。
///
/// # Arguments
/// * `query`: 带命名占位符的查询。
///
/// # Returns
/// 引用了未绑定参数时返回 `StoreError::Query`。
pub fn to_positional(query: &Query) -> Result<PositionalQuery, StoreError> {
    let source = query.sql();
    let mut sql = String::with_capacity(source.len());
    let mut order: Vec<&str> = Vec::new();
    let mut values = Vec::new();
    let mut quote: Option<char> = None;
    let mut chars = source.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if let Some(open) = quote {
            if ch == open {
                quote = None;
            }
            sql.push(ch);
            continue;
        }
        match ch {
            '\'' | '"' => {
                quote = Some(ch);
                sql.push(ch);
            }
            '$' if chars.peek().is_some_and(|(_, c)| is_name_start(*c)) => {
                let start = idx + 1;
                let mut end = start;
                while let Some((i, c)) = chars.peek().copied() {
                    if !is_name_char(c) {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }
                let name = &source[start..end];
                let position = match order.iter().position(|n| *n == name) {
                    Some(p) => p,
                    None => {
                        let value = query.param(name).ok_or_else(|| {
                            StoreError::Query(format!("unbound placeholder ${}", name))
                        })?;
                        order.push(name);
                        values.push(value.clone());
                        order.len() - 1
                    }
                };
                sql.push('?');
                sql.push_str(&(position + 1).to_string());
            }
            _ => sql.push(ch),
        }
    }

    Ok(PositionalQuery { sql, values })
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
