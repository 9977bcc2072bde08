// ==========================================
// 聚合物需求看板 - 颜色提取
// ==========================================
// 规则: 取首个 '-' 之后的文本，TRIM 后取首个单词并转大写
// 说明: 启发式解析，不校验颜色词表
// ==========================================

use crate::domain::types::UNDEFINED_KEY;

const COLOR_DELIMITER: char = '-';

/// 从物料描述中提取颜色键
///
/// # 示例
/// ```
/// use polymer_demand::engine::color::extract_color;
/// assert_eq!(extract_color("PVC CRISTAL-AZUL 123"), "AZUL");
/// assert_eq!(extract_color("PVC CRISTAL"), "INDEFINIDO");
/// ```
pub fn extract_color(description: &str) -> String {
    description
        .split_once(COLOR_DELIMITER)
        .and_then(|(_, rest)| rest.split_whitespace().next())
        .map(str::to_uppercase)
        .unwrap_or_else(|| UNDEFINED_KEY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_after_first_hyphen() {
        assert_eq!(extract_color("PVC CRISTAL-AZUL 123"), "AZUL");
        assert_eq!(extract_color("PVC CRISTAL -  verde claro"), "VERDE");
        assert_eq!(extract_color("CABO-PRETO-2,5MM"), "PRETO-2,5MM");
    }

    #[test]
    fn test_without_delimiter_is_undefined() {
        for description in ["", "PVC CRISTAL", "XLPE 90C", "   "] {
            assert_eq!(extract_color(description), UNDEFINED_KEY);
        }
    }

    #[test]
    fn test_empty_token_is_undefined() {
        assert_eq!(extract_color("PVC-"), UNDEFINED_KEY);
        assert_eq!(extract_color("PVC-   "), UNDEFINED_KEY);
    }
}
