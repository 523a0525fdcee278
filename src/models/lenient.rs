//! # 宽松反序列化辅助函数
//!
//! 后端直接把数据库行序列化成 JSON，未填写的列是 `null` 而不是缺省。
//! 这些列在结构体中使用非 `Option` 类型时，通过 `deserialize_with` 把 `null` 折算为默认值。

use serde::{Deserialize, Deserializer};

/// 把 `null` 解析为 `T::default()`
///
/// 与 `#[serde(default)]` 搭配使用：字段缺失走 `default`，字段为 `null` 走这里。
///
/// # 错误
/// 值既不是 `null` 也不能解析为 `T` 时返回错误
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
        #[serde(default, deserialize_with = "null_as_default")]
        progress: f64,
        #[serde(default, deserialize_with = "null_as_default")]
        tags: Vec<String>,
    }

    #[test]
    fn test_null_and_missing_become_default() {
        let row: Row = serde_json::from_value(json!({ "name": null, "tags": null })).unwrap();
        assert_eq!(row.name, "");
        assert_eq!(row.progress, 0.0);
        assert!(row.tags.is_empty());

        let row: Row = serde_json::from_value(json!({ "name": "登录", "progress": 60 })).unwrap();
        assert_eq!(row.name, "登录");
        assert_eq!(row.progress, 60.0);
    }

    #[test]
    fn test_wrong_type_still_rejected() {
        assert!(serde_json::from_value::<Row>(json!({ "progress": "sixty" })).is_err());
    }
}
