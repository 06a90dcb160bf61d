use serde_json::json;
use shared::validation::Errors;

use crate::model::event::EventDraft;

/// 単一項目のチェックを通過した入力値に対して、項目間の整合性を検証する。
#[derive(Debug, Default, Clone, Copy)]
pub struct EventValidator;

impl EventValidator {
    pub fn validate(&self, draft: &EventDraft, errors: &mut Errors) {
        // maxPrice が 0 のときは上限なし
        if draft.base_price > draft.max_price && draft.max_price != 0 {
            errors.reject_value(
                "basePrice",
                "wrongValue",
                "BasePrice is wrong",
                Some(json!(draft.base_price)),
            );
            errors.reject_value(
                "maxPrice",
                "wrongValue",
                "MaxPrice is wrong",
                Some(json!(draft.max_price)),
            );
            errors.reject("wrongPrices", "Values of prices are wrong");
        }

        let end_event_date_time = draft.end_event_date_time;
        if end_event_date_time < draft.begin_event_date_time
            || end_event_date_time < draft.close_enrollment_date_time
            || end_event_date_time < draft.begin_enrollment_date_time
        {
            errors.reject_value(
                "endEventDateTime",
                "wrongValue",
                "Time is wrong",
                Some(json!(end_event_date_time)),
            );
        }
    }
}
