//! Source header vocabulary and the canonical columns it maps to.

use phf::phf_map;

/// Canonical columns of the persisted survey table (everything except `id`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurveyColumn {
    Date,
    Title,
    CompanySize,
    Accoms,
    Experience,
    Currency,
    PayRange,
    Area,
    CompanyOrigin,
    WorkStyle,
    WorkArea,
}

impl SurveyColumn {
    pub const ALL: [Self; 11] = [
        Self::Date,
        Self::Title,
        Self::CompanySize,
        Self::Accoms,
        Self::Experience,
        Self::Currency,
        Self::PayRange,
        Self::Area,
        Self::CompanyOrigin,
        Self::WorkStyle,
        Self::WorkArea,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Title => "title",
            Self::CompanySize => "company_size",
            Self::Accoms => "accoms",
            Self::Experience => "experience",
            Self::Currency => "currency",
            Self::PayRange => "pay_range",
            Self::Area => "area",
            Self::CompanyOrigin => "company_origin",
            Self::WorkStyle => "work_style",
            Self::WorkArea => "work_area",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for SurveyColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Survey form headers (Turkish, verbatim from the export) to canonical columns.
///
/// The company size header really does contain two consecutive spaces.
pub static SOURCE_COLUMNS: phf::Map<&'static str, SurveyColumn> = phf_map! {
    "Zaman damgası" => SurveyColumn::Date,
    "Kendinizi ne olarak tanımlarsınız?" => SurveyColumn::Title,
    "Şirket  kadar büyük?" => SurveyColumn::CompanySize,
    "Yan haklar var mı?" => SurveyColumn::Accoms,
    "Tecrübe yılınız ?" => SurveyColumn::Experience,
    "Maaşınızın para birimi?" => SurveyColumn::Currency,
    "Maaş aralığınız?" => SurveyColumn::PayRange,
    "Çalıştığınız Sektör?" => SurveyColumn::Area,
    "Şirket Menşei" => SurveyColumn::CompanyOrigin,
    "Çalışma Şekli?" => SurveyColumn::WorkStyle,
    "Göreviniz nedir?" => SurveyColumn::WorkArea,
};

/// Look up the canonical column for a source header.
pub fn canonical_column(header: &str) -> Option<SurveyColumn> {
    SOURCE_COLUMNS.get(header).copied()
}

/// Positions of each canonical column inside a raw row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    positions: [Option<usize>; 11],
    dropped: Vec<String>,
}

impl HeaderMap {
    /// Resolve a header row. Unknown headers are dropped; when two headers map
    /// to the same column the first one wins.
    pub fn from_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::default();
        for (position, header) in headers.into_iter().enumerate() {
            let header = header.as_ref();
            match canonical_column(header) {
                Some(column) => {
                    let slot = &mut map.positions[column.index()];
                    if slot.is_some() {
                        tracing::warn!(%header, %column, "duplicate source header, keeping first");
                    } else {
                        *slot = Some(position);
                    }
                },
                None => map.dropped.push(header.to_owned()),
            }
        }
        map
    }

    pub fn position(&self, column: SurveyColumn) -> Option<usize> {
        self.positions[column.index()]
    }

    /// Source headers that did not match any canonical column.
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    /// Canonical columns absent from the source.
    pub fn missing(&self) -> Vec<SurveyColumn> {
        SurveyColumn::ALL.into_iter().filter(|c| self.position(*c).is_none()).collect()
    }

    /// Raw cell for `column`, `None` if the column or the cell is absent.
    pub fn cell<'a, S: AsRef<str>>(&self, row: &'a [S], column: SurveyColumn) -> Option<&'a str> {
        self.position(column).and_then(|i| row.get(i)).map(AsRef::as_ref)
    }
}
