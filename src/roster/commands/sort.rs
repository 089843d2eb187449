use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{SortField, SortOrder};
use crate::store::RecordStore;

/// Reorders the roster in place. Nothing is written to disk.
pub fn run(store: &mut RecordStore, field: SortField, order: SortOrder) -> Result<CmdResult> {
    store.sort_by(field, order);

    let direction = match order {
        SortOrder::Ascending => "ascending",
        SortOrder::Descending => "descending",
    };
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Sorted {} record(s) by {} ({})",
        store.len(),
        field,
        direction
    )));
    Ok(result.with_affected(store.records().to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::student;

    fn years(store: &RecordStore) -> Vec<i32> {
        store.records().iter().map(|r| r.birth_year).collect()
    }

    #[test]
    fn sorts_years_both_ways() {
        let mut store = RecordStore::new();
        for year in [2005, 1999, 2010] {
            store.push(student("X", year));
        }

        run(&mut store, SortField::BirthYear, SortOrder::Ascending).unwrap();
        assert_eq!(years(&store), vec![1999, 2005, 2010]);

        run(&mut store, SortField::BirthYear, SortOrder::Descending).unwrap();
        assert_eq!(years(&store), vec![2010, 2005, 1999]);
    }

    #[test]
    fn affected_reflects_new_order() {
        let mut store = RecordStore::new();
        store.push(student("Boris", 2000));
        store.push(student("anna", 2000));

        let result = run(&mut store, SortField::Name, SortOrder::Ascending).unwrap();
        assert_eq!(result.affected[0].name, "anna");
    }
}
