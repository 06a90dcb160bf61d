use serde::Serialize;
use serde_json::Value;

// 特定のフィールドに紐づくエラー
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub object_name: String,
    pub field: String,
    pub code: String,
    pub default_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_value: Option<Value>,
}

// 複数の値の組み合わせで発生したエラー
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalError {
    pub object_name: String,
    pub code: String,
    pub default_message: String,
}

/// リクエスト 1 件分の検証エラーを集める。
///
/// フィールドエラーは `reject_value`、グローバルエラーは `reject` で追加する。
/// レスポンスではフィールドエラー、グローバルエラーの順に並ぶ。
#[derive(Debug, Clone, PartialEq)]
pub struct Errors {
    object_name: String,
    field_errors: Vec<FieldError>,
    global_errors: Vec<GlobalError>,
}

impl Errors {
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            field_errors: Vec::new(),
            global_errors: Vec::new(),
        }
    }

    pub fn reject_value(
        &mut self,
        field: &str,
        code: &str,
        default_message: &str,
        rejected_value: Option<Value>,
    ) {
        self.field_errors.push(FieldError {
            object_name: self.object_name.clone(),
            field: field.to_string(),
            code: code.to_string(),
            default_message: default_message.to_string(),
            rejected_value,
        });
    }

    pub fn reject(&mut self, code: &str, default_message: &str) {
        self.global_errors.push(GlobalError {
            object_name: self.object_name.clone(),
            code: code.to_string(),
            default_message: default_message.to_string(),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.field_errors.is_empty() || !self.global_errors.is_empty()
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn global_errors(&self) -> &[GlobalError] {
        &self.global_errors
    }

    pub fn has_field_error(&self, field: &str) -> bool {
        self.field_errors.iter().any(|e| e.field == field)
    }

    /// garde の検証結果を取り込む。フィールド名は camelCase に揃える。
    pub fn extend_from_report(&mut self, report: &garde::Report) {
        for (path, error) in report.iter() {
            let field = to_camel_case(&path.to_string());
            self.reject_value(&field, "invalidValue", error.message(), None);
        }
    }

    /// 値が検証済みなら `Ok(())`、そうでなければ自身を `Err` で返す。
    pub fn into_result(self) -> Result<(), Self> {
        if self.has_errors() {
            Err(self)
        } else {
            Ok(())
        }
    }

    pub(crate) fn to_json(&self) -> Value {
        let mut errors: Vec<Value> = self
            .field_errors
            .iter()
            .filter_map(|e| serde_json::to_value(e).ok())
            .collect();
        errors.extend(
            self.global_errors
                .iter()
                .filter_map(|e| serde_json::to_value(e).ok()),
        );
        Value::Array(errors)
    }
}

fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper = false;
    for c in s.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
