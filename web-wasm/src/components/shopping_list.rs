//! おすすめアイテム一覧

use interior_ai_common::ShoppingItem;
use leptos::prelude::*;

#[component]
pub fn ShoppingList(items: Vec<ShoppingItem>) -> impl IntoView {
    let is_empty = items.is_empty();

    let rows = items
        .into_iter()
        .map(|item| {
            view! {
                <tr>
                    <td class="item-name">{item.item_name}</td>
                    <td><span class="category-badge">{item.category}</span></td>
                    <td class="recommendation">{item.recommendation}</td>
                    <td class="price">{item.estimated_price}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <section class="shopping-list">
            <div class="section-title">
                <span class="bag-icon">"🛍"</span>
                <h3>"Curated Shopping List"</h3>
            </div>

            <div class="table-card">
                <table>
                    <thead>
                        <tr>
                            <th>"Item Name"</th>
                            <th>"Category"</th>
                            <th>"Material / Color"</th>
                            <th class="price">"Est. Price"</th>
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
                {is_empty.then(|| view! {
                    <div class="empty-list">"No recommendations generated."</div>
                })}
            </div>

            <p class="price-note">
                "Prices are estimates based on current market averages for this style. Actual availability and pricing may vary by retailer."
            </p>
        </section>
    }
}
