use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Equipment line a quote is priced against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Brand {
    Budget,
    Premium,
}

impl Brand {
    pub fn manufacturer(self) -> &'static str {
        match self {
            Brand::Budget => "Ameristar",
            Brand::Premium => "American Standard",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "budget" | "ameristar" => Some(Self::Budget),
            "premium" | "amstd" => Some(Self::Premium),
            _ => None,
        }
    }
}

/// Physical configuration of the installed system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemType {
    Split,
    Package,
    #[serde(rename = "gaspack")]
    GasPack,
}

impl SystemType {
    /// Parses a quiz option id. Case, whitespace, hyphens and underscores are ignored;
    /// anything outside the three known configurations is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        match squash(raw).as_str() {
            "split" | "splitsystem" => Some(Self::Split),
            "package" | "packageunit" => Some(Self::Package),
            "gaspack" | "gaspackunit" => Some(Self::GasPack),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            SystemType::Split => "split",
            SystemType::Package => "package",
            SystemType::GasPack => "gaspack",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SystemType::Split => "Split System",
            SystemType::Package => "Package Unit",
            SystemType::GasPack => "Gas Pack",
        }
    }
}

/// Cooling capacity class in tons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    #[serde(rename = "2ton")]
    TwoTon,
    #[serde(rename = "3ton")]
    ThreeTon,
    #[serde(rename = "4ton")]
    FourTon,
    #[serde(rename = "5ton")]
    FiveTon,
}

impl SizeClass {
    pub const DEFAULT: SizeClass = SizeClass::ThreeTon;

    pub fn parse(raw: &str) -> Option<Self> {
        match squash(raw).as_str() {
            "2ton" | "2" => Some(Self::TwoTon),
            "3ton" | "3" => Some(Self::ThreeTon),
            "4ton" | "4" => Some(Self::FourTon),
            "5ton" | "5" => Some(Self::FiveTon),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            SizeClass::TwoTon => "2ton",
            SizeClass::ThreeTon => "3ton",
            SizeClass::FourTon => "4ton",
            SizeClass::FiveTon => "5ton",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizeClass::TwoTon => "2 Ton",
            SizeClass::ThreeTon => "3 Ton",
            SizeClass::FourTon => "4 Ton",
            SizeClass::FiveTon => "5 Ton",
        }
    }

    /// Fixed labor and overhead added to the dealer cost before markup.
    pub fn labor_overhead(self) -> u32 {
        match self {
            SizeClass::TwoTon | SizeClass::ThreeTon => 1000,
            SizeClass::FourTon | SizeClass::FiveTon => 1200,
        }
    }
}

fn squash(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Wholesale cost of one configuration, in whole dollars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerCost {
    pub cost: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}

impl DealerCost {
    fn new(cost: u32) -> Self {
        Self { cost, sku: None }
    }
}

/// Substitution applied when the requested configuration has no cost entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostFallback {
    pub requested_system_type: SystemType,
    pub requested_size: SizeClass,
    pub system_type: SystemType,
    pub size: SizeClass,
}

/// Outcome of resolving a configuration against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostResolution<'a> {
    pub system_type: SystemType,
    pub size: SizeClass,
    pub dealer_cost: &'a DealerCost,
    pub fallback: Option<CostFallback>,
}

type CostKey = (Brand, SystemType, SizeClass);

/// Dealer cost lookup keyed by brand, system type and size.
///
/// Every table carries a split/3-ton entry for both brands, which is where
/// resolution lands when a requested configuration is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealerCostTable {
    entries: BTreeMap<CostKey, DealerCost>,
    budget_anchor: DealerCost,
    premium_anchor: DealerCost,
}

const STANDARD_COSTS: [(Brand, SystemType, [u32; 4]); 6] = [
    (Brand::Budget, SystemType::Split, [3431, 3768, 4598, 4900]),
    (Brand::Budget, SystemType::Package, [4200, 4600, 5400, 5800]),
    (Brand::Budget, SystemType::GasPack, [4500, 4900, 5700, 6100]),
    (Brand::Premium, SystemType::Split, [5146, 5673, 6800, 7200]),
    (Brand::Premium, SystemType::Package, [6200, 6800, 7900, 8400]),
    (Brand::Premium, SystemType::GasPack, [6600, 7200, 8300, 8800]),
];

const SIZES: [SizeClass; 4] = [
    SizeClass::TwoTon,
    SizeClass::ThreeTon,
    SizeClass::FourTon,
    SizeClass::FiveTon,
];

impl DealerCostTable {
    /// The built-in price sheet.
    pub fn standard() -> Self {
        let mut entries = BTreeMap::new();
        for (brand, system_type, costs) in STANDARD_COSTS {
            for (size, cost) in SIZES.into_iter().zip(costs) {
                entries.insert((brand, system_type, size), DealerCost::new(cost));
            }
        }

        Self {
            entries,
            budget_anchor: DealerCost::new(3768),
            premium_anchor: DealerCost::new(5673),
        }
    }

    /// Builds a table from explicit entries. Fails when either brand lacks the
    /// split/3-ton anchor entry.
    pub fn from_entries<I>(entries: I) -> Result<Self, CostTableError>
    where
        I: IntoIterator<Item = (Brand, SystemType, SizeClass, DealerCost)>,
    {
        let entries: BTreeMap<CostKey, DealerCost> = entries
            .into_iter()
            .map(|(brand, system_type, size, cost)| ((brand, system_type, size), cost))
            .collect();

        let anchor = |brand: Brand| {
            entries
                .get(&(brand, SystemType::Split, SizeClass::DEFAULT))
                .cloned()
                .ok_or(CostTableError::MissingAnchor(brand))
        };
        let budget_anchor = anchor(Brand::Budget)?;
        let premium_anchor = anchor(Brand::Premium)?;

        Ok(Self {
            entries,
            budget_anchor,
            premium_anchor,
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CostTableError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads `brand,system_type,size,cost,sku` rows.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CostTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut entries = Vec::new();

        for (index, record) in csv_reader.deserialize::<CostRow>().enumerate() {
            let row = record?;
            let line = index + 2;
            let brand = Brand::parse(&row.brand).ok_or_else(|| CostTableError::InvalidRow {
                line,
                reason: format!("unknown brand '{}'", row.brand),
            })?;
            let system_type =
                SystemType::parse(&row.system_type).ok_or_else(|| CostTableError::InvalidRow {
                    line,
                    reason: format!("unknown system type '{}'", row.system_type),
                })?;
            let size = SizeClass::parse(&row.size).ok_or_else(|| CostTableError::InvalidRow {
                line,
                reason: format!("unknown size '{}'", row.size),
            })?;
            let sku = row.sku.filter(|sku| !sku.is_empty());

            entries.push((brand, system_type, size, DealerCost { cost: row.cost, sku }));
        }

        Self::from_entries(entries)
    }

    pub fn get(&self, brand: Brand, system_type: SystemType, size: SizeClass) -> Option<&DealerCost> {
        self.entries.get(&(brand, system_type, size))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves a configuration, substituting 3-ton and then split when the
    /// requested entry is absent. Never fails.
    pub fn resolve(
        &self,
        brand: Brand,
        system_type: SystemType,
        size: SizeClass,
    ) -> CostResolution<'_> {
        if let Some(dealer_cost) = self.get(brand, system_type, size) {
            return CostResolution {
                system_type,
                size,
                dealer_cost,
                fallback: None,
            };
        }

        let (resolved_type, dealer_cost) = match self.get(brand, system_type, SizeClass::DEFAULT) {
            Some(cost) => (system_type, cost),
            None => (SystemType::Split, self.anchor(brand)),
        };

        CostResolution {
            system_type: resolved_type,
            size: SizeClass::DEFAULT,
            dealer_cost,
            fallback: Some(CostFallback {
                requested_system_type: system_type,
                requested_size: size,
                system_type: resolved_type,
                size: SizeClass::DEFAULT,
            }),
        }
    }

    fn anchor(&self, brand: Brand) -> &DealerCost {
        match brand {
            Brand::Budget => &self.budget_anchor,
            Brand::Premium => &self.premium_anchor,
        }
    }
}

impl Default for DealerCostTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Deserialize)]
struct CostRow {
    brand: String,
    system_type: String,
    size: String,
    cost: u32,
    #[serde(default)]
    sku: Option<String>,
}

#[derive(Debug)]
pub enum CostTableError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: usize, reason: String },
    MissingAnchor(Brand),
}

impl std::fmt::Display for CostTableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CostTableError::Io(err) => write!(f, "failed to read dealer cost sheet: {}", err),
            CostTableError::Csv(err) => write!(f, "invalid dealer cost CSV data: {}", err),
            CostTableError::InvalidRow { line, reason } => {
                write!(f, "dealer cost sheet line {}: {}", line, reason)
            }
            CostTableError::MissingAnchor(brand) => write!(
                f,
                "dealer cost sheet has no split 3ton entry for {}",
                brand.manufacturer()
            ),
        }
    }
}

impl std::error::Error for CostTableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CostTableError::Io(err) => Some(err),
            CostTableError::Csv(err) => Some(err),
            CostTableError::InvalidRow { .. } | CostTableError::MissingAnchor(_) => None,
        }
    }
}

impl From<std::io::Error> for CostTableError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CostTableError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_covers_every_configuration() {
        let table = DealerCostTable::standard();
        assert_eq!(table.len(), 24);
        for brand in [Brand::Budget, Brand::Premium] {
            for system_type in [SystemType::Split, SystemType::Package, SystemType::GasPack] {
                for size in SIZES {
                    assert!(table.get(brand, system_type, size).is_some());
                }
            }
        }
        assert_eq!(
            table
                .get(Brand::Budget, SystemType::Split, SizeClass::ThreeTon)
                .map(|entry| entry.cost),
            Some(3768)
        );
    }

    #[test]
    fn system_type_parse_is_an_exact_match() {
        assert_eq!(SystemType::parse("gaspack"), Some(SystemType::GasPack));
        assert_eq!(SystemType::parse("Gas Pack"), Some(SystemType::GasPack));
        assert_eq!(SystemType::parse("PACKAGE"), Some(SystemType::Package));
        assert_eq!(SystemType::parse("split-system"), Some(SystemType::Split));
        assert_eq!(SystemType::parse("gaspackage"), None);
        assert_eq!(SystemType::parse("unknown-garbage"), None);
    }

    #[test]
    fn size_parse_accepts_spacing_variants() {
        assert_eq!(SizeClass::parse("4ton"), Some(SizeClass::FourTon));
        assert_eq!(SizeClass::parse(" 4 Ton "), Some(SizeClass::FourTon));
        assert_eq!(SizeClass::parse("10ton"), None);
    }

    #[test]
    fn resolve_falls_back_to_three_ton_then_split() {
        let table = DealerCostTable::from_entries([
            (Brand::Budget, SystemType::Split, SizeClass::ThreeTon, DealerCost::new(3000)),
            (Brand::Premium, SystemType::Split, SizeClass::ThreeTon, DealerCost::new(5000)),
            (Brand::Premium, SystemType::Package, SizeClass::ThreeTon, DealerCost::new(6000)),
        ])
        .expect("anchors present");

        let same_type = table.resolve(Brand::Premium, SystemType::Package, SizeClass::FiveTon);
        assert_eq!(same_type.system_type, SystemType::Package);
        assert_eq!(same_type.size, SizeClass::ThreeTon);
        assert_eq!(same_type.dealer_cost.cost, 6000);
        assert!(same_type.fallback.is_some());

        let to_split = table.resolve(Brand::Budget, SystemType::GasPack, SizeClass::TwoTon);
        assert_eq!(to_split.system_type, SystemType::Split);
        assert_eq!(to_split.size, SizeClass::ThreeTon);
        assert_eq!(to_split.dealer_cost.cost, 3000);
    }

    #[test]
    fn from_reader_parses_rows_and_skus() {
        let csv = "brand,system_type,size,cost,sku\n\
                   ameristar,split,3ton,3700,M4AC4036\n\
                   amstd,split,3ton,5600,\n\
                   amstd,gaspack,4ton,8250,A4GE4048\n";
        let table = DealerCostTable::from_reader(csv.as_bytes()).expect("table parses");

        assert_eq!(table.len(), 3);
        let gaspack = table
            .get(Brand::Premium, SystemType::GasPack, SizeClass::FourTon)
            .expect("gaspack row");
        assert_eq!(gaspack.cost, 8250);
        assert_eq!(gaspack.sku.as_deref(), Some("A4GE4048"));
        let split = table
            .get(Brand::Premium, SystemType::Split, SizeClass::ThreeTon)
            .expect("split row");
        assert_eq!(split.sku, None);
    }

    #[test]
    fn from_reader_requires_anchor_entries() {
        let csv = "brand,system_type,size,cost,sku\nameristar,split,3ton,3700,\n";
        let err = DealerCostTable::from_reader(csv.as_bytes()).expect_err("premium anchor missing");
        assert!(matches!(err, CostTableError::MissingAnchor(Brand::Premium)));
    }

    #[test]
    fn from_reader_reports_unknown_values_with_line() {
        let csv = "brand,system_type,size,cost,sku\nameristar,ductless,3ton,3700,\n";
        let err = DealerCostTable::from_reader(csv.as_bytes()).expect_err("bad system type");
        assert!(matches!(err, CostTableError::InvalidRow { line: 2, .. }));
    }
}
