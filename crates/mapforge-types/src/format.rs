//! Human-readable type and method names for diagnostics and logs.

use crate::db::TypeDatabase;
use crate::type_queries::{nested_name, qualified_name};
use crate::types::{MethodInfo, TypeId, TypeKind};

pub struct TypeFormatter<'a> {
    db: &'a dyn TypeDatabase,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(db: &'a dyn TypeDatabase) -> Self {
        Self { db }
    }

    /// Short form: `List<CarDto>`, `Car[]`, `int`.
    pub fn format(&self, id: TypeId) -> String {
        let Some(data) = self.db.type_data(id) else {
            return "<unknown>".to_string();
        };
        match data.kind {
            TypeKind::Array => match data.component {
                Some(component) => format!("{}[]", self.format(component)),
                None => "<unknown>[]".to_string(),
            },
            TypeKind::Declared if !data.type_args.is_empty() => {
                let args: Vec<String> = data.type_args.iter().map(|&a| self.format(a)).collect();
                format!("{}<{}>", nested_name(self.db, id), args.join(", "))
            }
            TypeKind::Declared => nested_name(self.db, id),
            _ => data.name.clone(),
        }
    }

    /// `com.acme.CarMapper#toDto(Car, CarDto)`
    pub fn format_method(&self, method: &MethodInfo) -> String {
        let params: Vec<String> = method
            .params
            .iter()
            .map(|p| self.format(p.type_id))
            .collect();
        format!(
            "{}#{}({})",
            qualified_name(self.db, method.declaring_type),
            method.name,
            params.join(", ")
        )
    }
}
