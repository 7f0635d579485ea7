//! Conversion between Gmail API objects and typed attribute records
//!
//! Pure and total: empty strings, `false`, `0` and empty sets on the attribute
//! side correspond to absent fields on the API side.

use google_gmail1::api::{self, Filter, Label};

use crate::models::{
    Counters, FilterAction, FilterConfig, FilterCriteria, FilterState, LabelColor, LabelConfig,
    LabelState, LabelVisibility,
};

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn non_default<T: Default + PartialEq>(value: T) -> Option<T> {
    if value == T::default() {
        None
    } else {
        Some(value)
    }
}

/// API label to observed state. A label without color maps to empty strings.
pub fn label_to_state(label: &Label) -> LabelState {
    let color = label
        .color
        .as_ref()
        .map(|c| LabelColor {
            text: c.text_color.clone().unwrap_or_default(),
            background: c.background_color.clone().unwrap_or_default(),
        })
        .unwrap_or_default();

    LabelState {
        id: label.id.clone().unwrap_or_default(),
        name: label.name.clone().unwrap_or_default(),
        messages: Counters {
            total: label.messages_total.unwrap_or_default(),
            unread: label.messages_unread.unwrap_or_default(),
        },
        threads: Counters {
            total: label.threads_total.unwrap_or_default(),
            unread: label.threads_unread.unwrap_or_default(),
        },
        visibility: LabelVisibility {
            message_list: label.message_list_visibility.clone().unwrap_or_default(),
            label_list: label.label_list_visibility.clone().unwrap_or_default(),
        },
        color,
    }
}

/// Label config to the API object sent on create and update.
/// The color sub-object is always present, like the visibility fields it may be empty.
pub fn label_from_config(config: &LabelConfig) -> Label {
    Label {
        name: Some(config.name.clone()),
        color: Some(api::LabelColor {
            text_color: non_empty(&config.color.text),
            background_color: non_empty(&config.color.background),
        }),
        message_list_visibility: non_empty(&config.visibility.message_list),
        label_list_visibility: non_empty(&config.visibility.label_list),
        ..Default::default()
    }
}

/// API filter to observed state
pub fn filter_to_state(filter: &Filter) -> FilterState {
    let criteria = filter.criteria.clone().unwrap_or_default();
    let action = filter.action.clone().unwrap_or_default();

    FilterState {
        id: filter.id.clone().unwrap_or_default(),
        criteria: FilterCriteria {
            from: criteria.from.unwrap_or_default(),
            to: criteria.to.unwrap_or_default(),
            subject: criteria.subject.unwrap_or_default(),
            query: criteria.query.unwrap_or_default(),
            negated_query: criteria.negated_query.unwrap_or_default(),
            has_attachment: criteria.has_attachment.unwrap_or_default(),
            exclude_chats: criteria.exclude_chats.unwrap_or_default(),
            size: criteria.size.unwrap_or_default(),
            size_comparison: criteria.size_comparison.unwrap_or_default(),
        },
        action: FilterAction {
            add_labels: action.add_label_ids.unwrap_or_default().into_iter().collect(),
            remove_labels: action
                .remove_label_ids
                .unwrap_or_default()
                .into_iter()
                .collect(),
            forward: action.forward.unwrap_or_default(),
        },
    }
}

/// Filter config to the API object sent on create
pub fn filter_from_config(config: &FilterConfig) -> Filter {
    let criteria = &config.criteria;
    let action = &config.action;

    Filter {
        criteria: Some(api::FilterCriteria {
            from: non_empty(&criteria.from),
            to: non_empty(&criteria.to),
            subject: non_empty(&criteria.subject),
            query: non_empty(&criteria.query),
            negated_query: non_empty(&criteria.negated_query),
            has_attachment: non_default(criteria.has_attachment),
            exclude_chats: non_default(criteria.exclude_chats),
            size: non_default(criteria.size),
            size_comparison: non_empty(&criteria.size_comparison),
        }),
        action: Some(api::FilterAction {
            add_label_ids: non_default(action.add_labels.iter().cloned().collect()),
            remove_label_ids: non_default(action.remove_labels.iter().cloned().collect()),
            forward: non_empty(&action.forward),
        }),
        ..Default::default()
    }
}
