use crate::domain::a001_store::ui::list::StoreList;
use crate::domain::a002_supplier_product::ui::list::SupplierProductList;
use crate::domain::a003_drop_order::ui::list::DropOrderList;
use crate::shared::icons::icon;
use crate::usecases::u504_catalog_import::CatalogImportWidget;
use leptos::prelude::*;

/// Разделы приложения
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Products,
    Orders,
    Stores,
    CatalogImport,
}

impl Page {
    fn title(&self) -> &'static str {
        match self {
            Page::Products => "Товары",
            Page::Orders => "Заказы",
            Page::Stores => "Магазины",
            Page::CatalogImport => "Импорт каталога",
        }
    }

    fn icon_name(&self) -> &'static str {
        match self {
            Page::Products => "products",
            Page::Orders => "orders",
            Page::Stores => "stores",
            Page::CatalogImport => "import",
        }
    }

    fn all() -> &'static [Page] {
        &[Page::Products, Page::Orders, Page::Stores, Page::CatalogImport]
    }
}

#[component]
#[allow(non_snake_case)]
pub fn Shell() -> impl IntoView {
    let (page, set_page) = signal(Page::Products);

    view! {
        <div class="app-layout" style="display: flex; min-height: 100vh;">
            <nav class="sidebar" style="width: 220px; background: #1f2933; color: #e4e7eb; padding: 16px 0; flex-shrink: 0;">
                <div style="padding: 0 16px 16px; font-weight: 600; font-size: 16px;">
                    {"Дропшиппинг"}
                </div>
                {Page::all().iter().map(|p| {
                    let p = *p;
                    view! {
                        <button
                            style="display: flex; align-items: center; gap: 8px; width: 100%; padding: 10px 16px; border: none; background: none; color: inherit; cursor: pointer; text-align: left; font-size: 14px;"
                            style:background={move || if page.get() == p { "#323f4b" } else { "transparent" }}
                            on:click=move |_| set_page.set(p)
                        >
                            {icon(p.icon_name())}
                            {p.title()}
                        </button>
                    }
                }).collect_view()}
            </nav>

            <main class="app-main" style="flex: 1; padding: 20px; background: #f5f7fa; overflow-x: auto;">
                {move || match page.get() {
                    Page::Products => view! { <SupplierProductList/> }.into_any(),
                    Page::Orders => view! { <DropOrderList/> }.into_any(),
                    Page::Stores => view! { <StoreList/> }.into_any(),
                    Page::CatalogImport => view! { <CatalogImportWidget/> }.into_any(),
                }}
            </main>
        </div>
    }
}
