use super::ui;
use crate::core::Currency;
use crate::service::CurrencyService;
use anyhow::Result;
use comfy_table::Cell;

pub fn display_rates(date: &str, rates: &[Currency]) -> String {
    let mut output = format!("Rates for {}\n\n", ui::style_text(date, ui::StyleType::Title));

    if rates.is_empty() {
        output.push_str(&ui::style_text(
            "No rates stored for this date",
            ui::StyleType::Subtle,
        ));
        return output;
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Currency"),
        ui::header_cell("Rate"),
        ui::header_cell("Date"),
    ]);
    for rate in rates {
        table.add_row(vec![
            Cell::new(&rate.code),
            Cell::new(&rate.title),
            ui::rate_cell(rate.value),
            Cell::new(rate.adate.format("%d.%m.%Y")),
        ]);
    }
    output.push_str(&table.to_string());
    output
}

pub async fn run(service: &CurrencyService, date: &str, code: Option<&str>) -> Result<()> {
    let rates = service.get_currency(date, code.unwrap_or_default()).await?;
    println!("{}", display_rates(date, &rates));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_display_rates_table() {
        let rates = vec![Currency {
            title: "US Dollar".to_string(),
            code: "USD".to_string(),
            value: 450.25,
            adate: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        }];

        let output = display_rates("15.06.2024", &rates);
        assert!(output.contains("US Dollar"));
        assert!(output.contains("USD"));
        assert!(output.contains("450.25"));
        assert!(output.contains("15.06.2024"));
    }

    #[test]
    fn test_display_no_rates() {
        let output = display_rates("15.06.2024", &[]);
        assert!(output.contains("No rates stored for this date"));
    }
}
