use arise_core::AppConfig;
use arise_storefront::{
    CheckboxGroup, PageContext, Storefront, StorefrontOptions, UiEvent,
};

use crate::catalog::{load_brand_table, load_store};
use crate::RenderArgs;

pub(crate) async fn run_render(config: &AppConfig, args: RenderArgs) -> anyhow::Result<()> {
    let brands = load_brand_table(config)?;
    let store = load_store(config, args.base.as_deref(), &brands).await?;
    let mut storefront = Storefront::new(
        store.shared(),
        StorefrontOptions::from_config(config, brands),
    );

    if args.page.is_some() || args.heading.is_some() {
        let mut page = PageContext::from_url(args.page.as_deref().unwrap_or("/"));
        if let Some(heading) = &args.heading {
            page = page.with_heading(heading);
        }
        storefront.open_page(&page);
    }

    for event in control_events(&args) {
        storefront.handle(event)?;
    }
    storefront.handle(UiEvent::Apply)?;
    if let Some(search) = args.search {
        storefront.handle(UiEvent::SubmitSearch(search))?;
    }

    let view = storefront.view();
    tracing::info!(
        shown = view.grid.cards.len(),
        total = store.len(),
        sort = %view.sort,
        "rendered storefront"
    );
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", view.to_html());
    }
    Ok(())
}

/// Sidebar interactions equivalent to the command-line filter flags.
pub(crate) fn control_events(args: &RenderArgs) -> Vec<UiEvent> {
    let checks = [
        (CheckboxGroup::Brand, &args.brands),
        (CheckboxGroup::Category, &args.categories),
        (CheckboxGroup::Size, &args.sizes),
    ];
    let mut events: Vec<UiEvent> = checks
        .into_iter()
        .flat_map(|(group, values)| {
            values.iter().map(move |value| UiEvent::ToggleCheckbox {
                group,
                value: value.clone(),
                checked: true,
            })
        })
        .collect();
    if let Some(min) = args.min_price {
        events.push(UiEvent::SetMinPrice(min));
    }
    if let Some(max) = args.max_price {
        events.push(UiEvent::SetMaxPrice(max));
    }
    if let Some(sort) = args.sort {
        events.push(UiEvent::ChangeSort(sort));
    }
    events
}
