//! Search box, pager and stat cards shared by master and report screens.

use common::listing::{first_row_number, Page};
use common::reports::{format_qty, StatCard};
use num_format::{Locale, ToFormattedString};
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub fn search_box(value: &str, on_input: Callback<String>) -> Html {
    html! {
        <div class="search-box">
            <span class="material-symbols-outlined">{"search"}</span>
            <input
                type="search"
                placeholder="Search"
                value={value.to_string()}
                oninput={move |e: InputEvent| on_input.emit(e.target_unchecked_into::<HtmlInputElement>().value())}
            />
        </div>
    }
}

/// "Showing x–y of n" plus previous/next buttons. `on_page` receives a 1-based page.
pub fn pager<T>(page: &Page<T>, per_page: usize, on_page: Callback<usize>) -> Html {
    let label = if page.total_items == 0 {
        "No records".to_string()
    } else {
        let first = first_row_number(page.page, per_page);
        format!(
            "Showing {}-{} of {}",
            first,
            first + page.items.len() - 1,
            page.total_items
        )
    };
    let current = page.page;
    let prev = {
        let on_page = on_page.clone();
        Callback::from(move |_: MouseEvent| on_page.emit(current.saturating_sub(1).max(1)))
    };
    let next = Callback::from(move |_: MouseEvent| on_page.emit(current + 1));

    html! {
        <div class="pager">
            <span>{ label }</span>
            <button class="icon-btn" disabled={current <= 1} onclick={prev}>
                <span class="material-symbols-outlined">{"chevron_left"}</span>
            </button>
            <span>{ format!("{} / {}", current, page.total_pages) }</span>
            <button class="icon-btn" disabled={current >= page.total_pages} onclick={next}>
                <span class="material-symbols-outlined">{"chevron_right"}</span>
            </button>
        </div>
    }
}

/// Whole numbers get thousands separators; fractions keep up to three decimals.
pub fn format_stat(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        (value as i64).to_formatted_string(&Locale::en)
    } else {
        format_qty(value)
    }
}

pub fn stat_cards(cards: &[StatCard]) -> Html {
    html! {
        <div class="stat-cards">
            { for cards.iter().map(|card| html! {
                <div class="stat-card">
                    <div class="stat-value">{ format_stat(card.value) }</div>
                    <div class="stat-label">{ card.label }</div>
                </div>
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_are_grouped_by_thousands() {
        assert_eq!(format_stat(1234567.0), "1,234,567");
        assert_eq!(format_stat(0.0), "0");
        assert_eq!(format_stat(12.5), "12.5");
    }
}
