//! Static navigation tree and access filtering.

use serde::{Deserialize, Serialize};

use crate::route::AppRoute;

/// Which client an access code applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuScope {
    Web,
    /// Hand-held terminal app.
    Hht,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuNode {
    /// Access code; `0` marks a group that is visible through its children.
    pub code: u32,
    pub label: &'static str,
    pub icon: &'static str,
    pub route: Option<AppRoute>,
    pub children: &'static [MenuNode],
}

const fn leaf(code: u32, label: &'static str, icon: &'static str, route: AppRoute) -> MenuNode {
    MenuNode {
        code,
        label,
        icon,
        route: Some(route),
        children: &[],
    }
}

const fn group(label: &'static str, icon: &'static str, children: &'static [MenuNode]) -> MenuNode {
    MenuNode {
        code: 0,
        label,
        icon,
        route: None,
        children,
    }
}

const MASTER_MENU: &[MenuNode] = &[
    leaf(10, "Company", "business", AppRoute::CompanyMaster),
    leaf(11, "UOM", "straighten", AppRoute::UomMaster),
    leaf(12, "Warehouse Category", "warehouse", AppRoute::WarehouseCategoryMaster),
    leaf(13, "Item Packing", "package_2", AppRoute::ItemPackingMaster),
    leaf(14, "Session", "timer", AppRoute::SessionMaster),
    leaf(15, "User Role", "admin_panel_settings", AppRoute::UserRoleMaster),
];

const TRANSACTION_MENU: &[MenuNode] = &[
    leaf(20, "FG Label Printing", "print", AppRoute::LabelPrinting),
    leaf(21, "GRN Receipt", "move_to_inbox", AppRoute::GrnReceipt),
    leaf(22, "Stock Transfer", "local_shipping", AppRoute::StockTransfer),
    leaf(23, "Existing Data Labels", "qr_code_2", AppRoute::ExistingDataLabels),
];

const REPORT_MENU: &[MenuNode] = &[
    leaf(30, "FG Label Printing", "receipt_long", AppRoute::FgLabelPrintingReport),
    leaf(31, "Material Receipt", "input", AppRoute::MaterialReceiptReport),
    leaf(32, "Material Return", "assignment_return", AppRoute::MaterialReturnReport),
    leaf(33, "FG Movement", "timeline", AppRoute::FgMovementReport),
];

pub const WEB_MENU: &[MenuNode] = &[
    leaf(1, "Dashboard", "dashboard", AppRoute::Dashboard),
    group("Master", "inventory_2", MASTER_MENU),
    group("Transactions", "swap_horiz", TRANSACTION_MENU),
    group("Reports", "assessment", REPORT_MENU),
];

/// Screens of the hand-held app. Only used to edit role access here.
pub const HHT_MENU: &[MenuNode] = &[
    MenuNode { code: 50, label: "Put Away", icon: "", route: None, children: &[] },
    MenuNode { code: 51, label: "Picking", icon: "", route: None, children: &[] },
    MenuNode { code: 52, label: "Stock Count", icon: "", route: None, children: &[] },
    MenuNode { code: 53, label: "Dispatch", icon: "", route: None, children: &[] },
    MenuNode { code: 54, label: "Material Return", icon: "", route: None, children: &[] },
];

pub fn tree(scope: MenuScope) -> &'static [MenuNode] {
    match scope {
        MenuScope::Web => WEB_MENU,
        MenuScope::Hht => HHT_MENU,
    }
}

/// Menu entry after access filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleMenu {
    pub label: &'static str,
    pub icon: &'static str,
    pub route: Option<AppRoute>,
    pub children: Vec<VisibleMenu>,
}

/// Keeps leaves whose code is in `access`; groups survive only with visible children.
pub fn filter_menu(nodes: &[MenuNode], access: &[u32]) -> Vec<VisibleMenu> {
    nodes
        .iter()
        .filter_map(|node| {
            if node.children.is_empty() {
                access.contains(&node.code).then(|| VisibleMenu {
                    label: node.label,
                    icon: node.icon,
                    route: node.route,
                    children: Vec::new(),
                })
            } else {
                let children = filter_menu(node.children, access);
                (!children.is_empty()).then(|| VisibleMenu {
                    label: node.label,
                    icon: node.icon,
                    route: node.route,
                    children,
                })
            }
        })
        .collect()
}

/// All gated leaves in tree order, e.g. for the access checkboxes on the role form.
pub fn leaves(scope: MenuScope) -> Vec<&'static MenuNode> {
    fn walk(nodes: &'static [MenuNode], out: &mut Vec<&'static MenuNode>) {
        for node in nodes {
            if node.children.is_empty() {
                out.push(node);
            } else {
                walk(node.children, out);
            }
        }
    }
    let mut out = Vec::new();
    walk(tree(scope), &mut out);
    out
}

pub fn code_for_route(route: AppRoute) -> Option<u32> {
    leaves(MenuScope::Web)
        .into_iter()
        .find(|node| node.route == Some(route))
        .map(|node| node.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_access_hides_everything() {
        assert!(filter_menu(WEB_MENU, &[]).is_empty());
    }

    #[test]
    fn groups_appear_only_with_visible_children() {
        let visible = filter_menu(WEB_MENU, &[1, 11, 31]);
        let labels: Vec<_> = visible.iter().map(|m| m.label).collect();
        assert_eq!(labels, vec!["Dashboard", "Master", "Reports"]);

        let master = &visible[1];
        assert_eq!(master.children.len(), 1);
        assert_eq!(master.children[0].route, Some(AppRoute::UomMaster));
    }

    #[test]
    fn codes_are_unique_per_scope() {
        for scope in [MenuScope::Web, MenuScope::Hht] {
            let mut codes: Vec<u32> = leaves(scope).iter().map(|n| n.code).collect();
            let before = codes.len();
            codes.sort_unstable();
            codes.dedup();
            assert_eq!(codes.len(), before);
            assert!(!codes.contains(&0));
        }
    }

    #[test]
    fn routes_resolve_to_codes() {
        assert_eq!(code_for_route(AppRoute::Dashboard), Some(1));
        assert_eq!(code_for_route(AppRoute::FgMovementReport), Some(33));
        assert_eq!(code_for_route(AppRoute::Login), None);
    }
}
