use scraper::{ElementRef, Html, Selector};

use crate::scraper::models::{DiaryEntry, FoodItem, MealData};

fn cell_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn nth_or_default(cells: &[String], idx: usize) -> String {
    cells.get(idx).cloned().unwrap_or_default()
}

/// Collect every hidden input as a (name, value) pair, in document order.
/// The login form's anti-forgery tokens travel through here unchanged.
pub fn extract_form_fields(doc: &Html) -> Vec<(String, String)> {
    let sel = Selector::parse(r#"input[type="hidden"]"#).unwrap();

    let mut fields = Vec::new();
    for input in doc.select(&sel) {
        let name = input.value().attr("name").unwrap_or("");
        if name.is_empty() {
            continue;
        }
        let value = input.value().attr("value").unwrap_or("");
        fields.push((name.to_string(), value.to_string()));
    }

    fields
}

/// The sign-in button carries the postback target in its onclick handler,
/// e.g. `__doPostBack('ctl00$...$LoginButton','')`.
pub fn find_login_button_id(doc: &Html) -> Option<String> {
    let sel = Selector::parse("button.signIn").unwrap();

    for button in doc.select(&sel) {
        let Some(onclick) = button.value().attr("onclick") else {
            continue;
        };
        if !onclick.contains("__doPostBack") {
            continue;
        }
        if let Some(id) = onclick.split('\'').nth(1) {
            if !id.is_empty() {
                return Some(id.to_string());
            }
        }
    }

    None
}

/// Extract a full diary page. Every anchor is optional: a missing block
/// leaves its fields empty instead of failing the extraction.
pub fn extract_diary_entry(doc: &Html) -> DiaryEntry {
    let mut entry = DiaryEntry::default();

    // Day totals live in the third row of the header nutrition table,
    // four `td.sub` cells in fixed fat/carbs/protein/calories order.
    let header_sel =
        Selector::parse("div.MyFSHeaderFooterAdditional table.foodsNutritionTbl").unwrap();
    if let Some(header) = doc.select(&header_sel).next() {
        let sub_sel = Selector::parse("tr:nth-child(3) td.sub").unwrap();
        let subs: Vec<String> = header.select(&sub_sel).map(cell_text).collect();
        entry.fat = nth_or_default(&subs, 0);
        entry.carbs = nth_or_default(&subs, 1);
        entry.protein = nth_or_default(&subs, 2);
        entry.calories = nth_or_default(&subs, 3);
    }

    let date_sel = Selector::parse("div.subtitle").unwrap();
    if let Some(date) = doc.select(&date_sel).next() {
        entry.date = cell_text(date);
    }

    let idr_sel = Selector::parse("div.big").unwrap();
    if let Some(idr) = doc.select(&idr_sel).next() {
        entry.idr = cell_text(idr);
    }

    let meal_sel = Selector::parse("table.generic.foodsTbl").unwrap();
    entry.meals = doc.select(&meal_sel).map(extract_meal).collect();

    entry
}

fn extract_meal(table: ElementRef) -> MealData {
    let mut meal = MealData::default();

    let header_sel =
        Selector::parse("tr:first-child td table.foodsNutritionTbl tr:first-child").unwrap();
    if let Some(header_row) = table.select(&header_sel).next() {
        let name_sel = Selector::parse("td.greytitlex").unwrap();
        if let Some(name) = header_row.select(&name_sel).next() {
            meal.name = cell_text(name);
        }

        let sub_sel = Selector::parse("td.sub").unwrap();
        let subs: Vec<String> = header_row.select(&sub_sel).map(cell_text).collect();
        meal.fat = nth_or_default(&subs, 0);
        meal.carbs = nth_or_default(&subs, 1);
        meal.protein = nth_or_default(&subs, 2);
        meal.calories = nth_or_default(&subs, 3);
    }

    // One bordered cell per food row; rows without a name (e.g. the
    // totals row) are dropped.
    let item_cell_sel = Selector::parse("tr td.borderLeft.borderRight").unwrap();
    let item_row_sel = Selector::parse("table.foodsNutritionTbl tr").unwrap();
    for cell in table.select(&item_cell_sel) {
        if let Some(row) = cell.select(&item_row_sel).next() {
            let item = extract_food_item(row);
            if !item.name.is_empty() {
                meal.items.push(item);
            }
        }
    }

    meal
}

fn extract_food_item(row: ElementRef) -> FoodItem {
    let mut item = FoodItem::default();

    let name_sel = Selector::parse("td:nth-child(1) a").unwrap();
    if let Some(name) = row.select(&name_sel).next() {
        item.name = cell_text(name);
    }

    let quantity_sel = Selector::parse("td:nth-child(1) div.smallText").unwrap();
    if let Some(quantity) = row.select(&quantity_sel).next() {
        item.quantity = cell_text(quantity);
    }

    let cells_sel = Selector::parse("td.normal").unwrap();
    let cells: Vec<String> = row.select(&cells_sel).map(cell_text).collect();
    item.fat = nth_or_default(&cells, 0);
    item.carbs = nth_or_default(&cells, 1);
    item.protein = nth_or_default(&cells, 2);
    item.calories = nth_or_default(&cells, 3);

    item
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal_table(rows: &str) -> String {
        format!(
            r#"
            <table class="generic foodsTbl">
              <tr><td>
                <table class="foodsNutritionTbl">
                  <tr>
                    <td class="greytitlex">Breakfast</td>
                    <td class="sub">10,5</td>
                    <td class="sub">42,0</td>
                    <td class="sub">18,3</td>
                    <td class="sub">350</td>
                  </tr>
                </table>
              </td></tr>
              {rows}
            </table>
            "#
        )
    }

    fn food_row(name: &str, quantity: &str, values: [&str; 4]) -> String {
        let link = if name.is_empty() {
            String::new()
        } else {
            format!(r##"<a href="#">{name}</a>"##)
        };
        format!(
            r#"
            <tr><td class="borderLeft borderRight">
              <table class="foodsNutritionTbl">
                <tr>
                  <td>{link}<div class="smallText">{quantity}</div></td>
                  <td class="normal">{}</td>
                  <td class="normal">{}</td>
                  <td class="normal">{}</td>
                  <td class="normal">{}</td>
                </tr>
              </table>
            </td></tr>
            "#,
            values[0], values[1], values[2], values[3]
        )
    }

    #[test]
    fn hidden_fields_keep_document_order() {
        let doc = Html::parse_document(
            r#"
            <form>
              <input type="hidden" name="__VIEWSTATE" value="abc" />
              <input type="hidden" name="__EVENTVALIDATION" value="xyz" />
              <input type="hidden" value="anonymous" />
              <input type="text" name="visible" value="nope" />
            </form>
            "#,
        );

        let fields = extract_form_fields(&doc);
        assert_eq!(
            fields,
            vec![
                ("__VIEWSTATE".to_string(), "abc".to_string()),
                ("__EVENTVALIDATION".to_string(), "xyz".to_string()),
            ]
        );
    }

    #[test]
    fn login_button_id_comes_from_postback_handler() {
        let doc = Html::parse_document(
            r#"
            <button class="signIn" onclick="somethingElse()">Nope</button>
            <button class="signIn"
                onclick="__doPostBack('ctl00$ctl12$Logincontrol1$LoginButton','')">
                Sign in
            </button>
            "#,
        );

        assert_eq!(
            find_login_button_id(&doc).as_deref(),
            Some("ctl00$ctl12$Logincontrol1$LoginButton")
        );
    }

    #[test]
    fn login_button_id_absent_without_postback() {
        let doc = Html::parse_document(
            r#"<button class="signIn" onclick="login()">Sign in</button>"#,
        );
        assert_eq!(find_login_button_id(&doc), None);
    }

    #[test]
    fn extraction_survives_missing_header_table() {
        let doc = Html::parse_document(
            r#"
            <div class="subtitle"> 26/03/2025 </div>
            <div class="big">87%</div>
            "#,
        );

        let entry = extract_diary_entry(&doc);
        assert_eq!(entry.date, "26/03/2025");
        assert_eq!(entry.idr, "87%");
        assert_eq!(entry.fat, "");
        assert_eq!(entry.carbs, "");
        assert_eq!(entry.protein, "");
        assert_eq!(entry.calories, "");
    }

    #[test]
    fn header_cells_map_positionally() {
        let doc = Html::parse_document(
            r#"
            <div class="MyFSHeaderFooterAdditional">
              <table class="foodsNutritionTbl">
                <tr><td>labels</td></tr>
                <tr><td>units</td></tr>
                <tr>
                  <td class="sub"> 55,2 </td>
                  <td class="sub">230,1</td>
                  <td class="sub">98,4</td>
                  <td class="sub">1.845</td>
                </tr>
              </table>
            </div>
            "#,
        );

        let entry = extract_diary_entry(&doc);
        assert_eq!(entry.fat, "55,2");
        assert_eq!(entry.carbs, "230,1");
        assert_eq!(entry.protein, "98,4");
        assert_eq!(entry.calories, "1.845");
    }

    #[test]
    fn nameless_food_rows_are_dropped() {
        let rows = [
            food_row("Pão francês", "2 unidades", ["3,1", "57,0", "9,2", "300"]),
            food_row("", "", ["10,0", "20,0", "5,0", "200"]),
            food_row("Café com leite", "200 ml", ["4,2", "9,8", "6,1", "104"]),
        ]
        .join("\n");
        let doc = Html::parse_document(&meal_table(&rows));

        let entry = extract_diary_entry(&doc);
        assert_eq!(entry.meals.len(), 1);

        let meal = &entry.meals[0];
        assert_eq!(meal.name, "Breakfast");
        assert_eq!(meal.calories, "350");
        assert_eq!(meal.items.len(), 2);
        assert_eq!(meal.items[0].name, "Pão francês");
        assert_eq!(meal.items[0].quantity, "2 unidades");
        assert_eq!(meal.items[0].carbs, "57,0");
        assert_eq!(meal.items[1].name, "Café com leite");
        assert_eq!(meal.items[1].calories, "104");
    }
}
