//! Page Binding
//!
//! Attaches the filter engine to server-rendered digest markup.
//! Chips, items and sections are looked up once; afterwards only chip
//! clicks drive updates.

use std::cell::RefCell;
use std::rc::Rc;

use facet_filter::{Chip, FilterEngine, FilterItem, FilterKind, Section, Visibility};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Node, NodeList};

use crate::config::PageContract;
use crate::error::AppResult;

/// Filter state owning the page's chip, item and section elements
pub struct PageFilter {
    contract: PageContract,
    engine: FilterEngine,
    /// Parallel to `engine.chips()`
    chip_elements: Vec<Element>,
    /// Parallel to `engine.items()`
    item_elements: Vec<Element>,
    /// Parallel to `engine.sections()`
    section_elements: Vec<HtmlElement>,
}

impl PageFilter {
    /// One-time lookup of everything the filter works on
    pub fn scan(document: &Document, contract: PageContract) -> AppResult<Self> {
        let chip_elements = elements(document.query_selector_all(&contract.chip_selector)?);
        let chips = chip_elements
            .iter()
            .map(|el| {
                chip_from_attrs(
                    el.get_attribute(&contract.filter_attr),
                    el.get_attribute(&contract.value_attr),
                    el.class_list().contains(&contract.active_class),
                )
            })
            .collect();

        let item_elements = elements(document.query_selector_all(&contract.item_selector)?);
        let items = item_elements
            .iter()
            .map(|el| {
                FilterItem::from_attrs(
                    el.get_attribute(&contract.subreddit_attr),
                    el.get_attribute(&contract.tools_attr).as_deref(),
                )
            })
            .collect();

        let mut found = Vec::new();
        for el in elements(document.query_selector_all(&contract.section_selector)?) {
            let children = elements(el.query_selector_all(&contract.item_selector)?);
            let members = member_indices(&item_elements, &children, |item, child| {
                let child: &Node = child;
                item.is_same_node(Some(child))
            });
            found.push((el, members));
        }
        let (section_elements, sections) =
            build_sections(found, |el| el.dyn_into::<HtmlElement>().ok());

        log::info!(
            "[PAGE] Found {} chips, {} items, {} sections",
            chip_elements.len(),
            item_elements.len(),
            section_elements.len()
        );

        Ok(Self {
            contract,
            engine: FilterEngine::new(chips, items, sections),
            chip_elements,
            item_elements,
            section_elements,
        })
    }

    /// Register one click handler per chip and bring the page in line with
    /// the initial chip state. The listeners live as long as the page.
    pub fn attach(self) -> AppResult<Rc<RefCell<Self>>> {
        let chip_elements = self.chip_elements.clone();
        let page = Rc::new(RefCell::new(self));

        for (index, chip) in chip_elements.iter().enumerate() {
            let page = Rc::clone(&page);
            let on_click = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(
                move |_ev: web_sys::MouseEvent| {
                    if let Err(e) = page.borrow_mut().on_chip_click(index) {
                        log::error!("[PAGE] Chip {} click failed: {}", index, e);
                    }
                },
            );
            chip.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
            on_click.forget();
        }

        {
            let current = page.borrow();
            current.render(&current.engine.apply_filters())?;
        }
        log::info!("[PAGE] Attached to {} chips", chip_elements.len());
        Ok(page)
    }

    fn on_chip_click(&mut self, index: usize) -> AppResult<()> {
        let visibility = self.engine.toggle(index)?;
        if let Some(chip) = self.chip_elements.get(index) {
            set_class(chip, &self.contract.active_class, self.engine.is_active(index))?;
        }
        self.render(&visibility)
    }

    /// Write a pass's result to the DOM
    pub fn render(&self, visibility: &Visibility) -> AppResult<()> {
        for (i, el) in self.item_elements.iter().enumerate() {
            set_class(el, &self.contract.hidden_class, !visibility.is_item_visible(i))?;
        }
        for (i, el) in self.section_elements.iter().enumerate() {
            let display = if visibility.is_section_visible(i) { "" } else { "none" };
            el.style().set_property("display", display)?;
        }
        Ok(())
    }
}

/// Chip as described by its markup attributes
pub fn chip_from_attrs(filter: Option<String>, value: Option<String>, active: bool) -> Chip {
    Chip {
        kind: FilterKind::parse(filter.as_deref().unwrap_or_default()),
        value: value.unwrap_or_default(),
        active,
    }
}

/// Positions in `items` of each child, matched by `same`; unknown children are skipped
fn member_indices<T>(items: &[T], children: &[T], same: impl Fn(&T, &T) -> bool) -> Vec<usize> {
    children
        .iter()
        .filter_map(|child| items.iter().position(|item| same(item, child)))
        .collect()
}

/// Keep the sections `cast` accepts, paired with their members
fn build_sections<S, H>(
    found: Vec<(S, Vec<usize>)>,
    cast: impl Fn(S) -> Option<H>,
) -> (Vec<H>, Vec<Section>) {
    let mut elements = Vec::new();
    let mut sections = Vec::new();
    for (el, members) in found {
        match cast(el) {
            Some(html) => {
                elements.push(html);
                sections.push(Section::new(members));
            }
            None => log::warn!("[PAGE] Skipping non-HTML section element"),
        }
    }
    (elements, sections)
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn set_class(el: &Element, class: &str, on: bool) -> AppResult<()> {
    let classes = el.class_list();
    if on {
        classes.add_1(class)?;
    } else {
        classes.remove_1(class)?;
    }
    Ok(())
}
