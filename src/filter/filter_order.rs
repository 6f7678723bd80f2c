use super::types::FilterOrderInfo;

pub struct FilterOrder;

impl FilterOrder {
    pub fn generate(infos: &[FilterOrderInfo]) -> String {
        if infos.is_empty() { return String::new(); }
        let parts: Vec<String> = infos
            .iter()
            .map(|i| format!("\"{}\" {}", i.column, i.sort.to_sql()))
            .collect();
        format!("ORDER BY {}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::types::SortDirection;

    #[test]
    fn renders_columns_in_sequence() {
        let infos = vec![
            FilterOrderInfo { column: "updated_at".into(), sort: SortDirection::Desc },
            FilterOrderInfo { column: "id".into(), sort: SortDirection::Asc },
        ];
        assert_eq!(FilterOrder::generate(&infos), "ORDER BY \"updated_at\" DESC, \"id\" ASC");
        assert_eq!(FilterOrder::generate(&[]), "");
    }
}
