//! Application routes.
//!
//! Pure path <-> route mapping plus the guard rules; the browser history
//! plumbing lives in the front end.

use std::fmt::Display;

use crate::menu;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    #[default]
    Login,
    ChangePassword,
    Dashboard,
    CompanyMaster,
    UomMaster,
    WarehouseCategoryMaster,
    ItemPackingMaster,
    SessionMaster,
    UserRoleMaster,
    LabelPrinting,
    GrnReceipt,
    StockTransfer,
    ExistingDataLabels,
    FgLabelPrintingReport,
    MaterialReceiptReport,
    MaterialReturnReport,
    FgMovementReport,
    NotFound,
}

const ROUTES: &[(AppRoute, &str)] = &[
    (AppRoute::Login, "/login"),
    (AppRoute::ChangePassword, "/change-password"),
    (AppRoute::Dashboard, "/dashboard"),
    (AppRoute::CompanyMaster, "/master/company"),
    (AppRoute::UomMaster, "/master/uom"),
    (AppRoute::WarehouseCategoryMaster, "/master/warehouse-category"),
    (AppRoute::ItemPackingMaster, "/master/item-packing"),
    (AppRoute::SessionMaster, "/master/session"),
    (AppRoute::UserRoleMaster, "/master/user-role"),
    (AppRoute::LabelPrinting, "/transactions/label-printing"),
    (AppRoute::GrnReceipt, "/transactions/grn"),
    (AppRoute::StockTransfer, "/transactions/stock-transfer"),
    (AppRoute::ExistingDataLabels, "/transactions/existing-data"),
    (AppRoute::FgLabelPrintingReport, "/reports/fg-label-printing"),
    (AppRoute::MaterialReceiptReport, "/reports/material-receipt"),
    (AppRoute::MaterialReturnReport, "/reports/material-return"),
    (AppRoute::FgMovementReport, "/reports/fg-movement"),
    (AppRoute::NotFound, "/404"),
];

impl AppRoute {
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Self::Login;
        }
        ROUTES
            .iter()
            .find(|(_, p)| *p == trimmed)
            .map(|(route, _)| *route)
            .unwrap_or(Self::NotFound)
    }

    pub fn to_path(&self) -> &'static str {
        ROUTES
            .iter()
            .find(|(route, _)| route == self)
            .map(|(_, p)| *p)
            .unwrap_or("/404")
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }

    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// Web menu code gating this route, if it appears in the menu tree.
    pub fn menu_code(&self) -> Option<u32> {
        menu::code_for_route(*self)
    }

    /// Whether a user holding `access` may open this route.
    ///
    /// Routes outside the menu tree (login, change password) are always open.
    pub fn is_allowed(&self, access: &[u32]) -> bool {
        match self.menu_code() {
            Some(code) => access.contains(&code),
            None => true,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for (route, path) in ROUTES {
            assert_eq!(AppRoute::from_path(path), *route);
            assert_eq!(route.to_path(), *path);
        }
    }

    #[test]
    fn root_query_and_trailing_slash_are_tolerated() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/dashboard/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/master/uom?page=2"), AppRoute::UomMaster);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn guards() {
        assert!(!AppRoute::Login.requires_auth());
        assert!(AppRoute::SessionMaster.requires_auth());
        assert!(AppRoute::Login.should_redirect_when_authenticated());
        assert!(AppRoute::ChangePassword.is_allowed(&[]));
    }

    #[test]
    fn menu_gating_follows_access_codes() {
        let code = AppRoute::CompanyMaster.menu_code().unwrap();
        assert!(AppRoute::CompanyMaster.is_allowed(&[code]));
        assert!(!AppRoute::CompanyMaster.is_allowed(&[]));
    }
}
