use nalgebra::Point3;
use std::fmt;

pub type Point = Point3<f64>;

/// Amino-acid vocabulary recognized on `ATOM` and `SEQRES` records.
///
/// Besides the twenty standard residues the enum carries the rare residues that occur in
/// deposited structures (selenocysteine, pyrrolysine, the ambiguous Glx/Asx codes) and the
/// unknown-residue marker. Rare and unknown residues keep their place in a sequence but make the
/// model that contains them ineligible for acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AminoAcid {
    ALA,
    ARG,
    ASN,
    ASP,
    CYS,
    GLN,
    GLU,
    GLY,
    HIS,
    ILE,
    LEU,
    LYS,
    MET,
    PHE,
    PRO,
    SER,
    THR,
    TRP,
    TYR,
    VAL,
    SEC,
    PYL,
    GLX,
    ASX,
    UNK,
}

impl AminoAcid {
    /// Every residue, in declaration order.
    pub const ALL: [AminoAcid; 25] = [
        AminoAcid::ALA,
        AminoAcid::ARG,
        AminoAcid::ASN,
        AminoAcid::ASP,
        AminoAcid::CYS,
        AminoAcid::GLN,
        AminoAcid::GLU,
        AminoAcid::GLY,
        AminoAcid::HIS,
        AminoAcid::ILE,
        AminoAcid::LEU,
        AminoAcid::LYS,
        AminoAcid::MET,
        AminoAcid::PHE,
        AminoAcid::PRO,
        AminoAcid::SER,
        AminoAcid::THR,
        AminoAcid::TRP,
        AminoAcid::TYR,
        AminoAcid::VAL,
        AminoAcid::SEC,
        AminoAcid::PYL,
        AminoAcid::GLX,
        AminoAcid::ASX,
        AminoAcid::UNK,
    ];

    /// Returns the IUPAC one-letter code written into sequences and coordinate lines.
    pub fn one_letter(self) -> char {
        match self {
            AminoAcid::ALA => 'A',
            AminoAcid::ARG => 'R',
            AminoAcid::ASN => 'N',
            AminoAcid::ASP => 'D',
            AminoAcid::CYS => 'C',
            AminoAcid::GLN => 'Q',
            AminoAcid::GLU => 'E',
            AminoAcid::GLY => 'G',
            AminoAcid::HIS => 'H',
            AminoAcid::ILE => 'I',
            AminoAcid::LEU => 'L',
            AminoAcid::LYS => 'K',
            AminoAcid::MET => 'M',
            AminoAcid::PHE => 'F',
            AminoAcid::PRO => 'P',
            AminoAcid::SER => 'S',
            AminoAcid::THR => 'T',
            AminoAcid::TRP => 'W',
            AminoAcid::TYR => 'Y',
            AminoAcid::VAL => 'V',
            AminoAcid::SEC => 'U',
            AminoAcid::PYL => 'O',
            AminoAcid::GLX => 'Z',
            AminoAcid::ASX => 'B',
            AminoAcid::UNK => 'X',
        }
    }

    /// Inverse of [`AminoAcid::one_letter`], used when reading trace reports back.
    pub fn from_one_letter(code: char) -> Option<Self> {
        let residue = match code {
            'A' => AminoAcid::ALA,
            'R' => AminoAcid::ARG,
            'N' => AminoAcid::ASN,
            'D' => AminoAcid::ASP,
            'C' => AminoAcid::CYS,
            'Q' => AminoAcid::GLN,
            'E' => AminoAcid::GLU,
            'G' => AminoAcid::GLY,
            'H' => AminoAcid::HIS,
            'I' => AminoAcid::ILE,
            'L' => AminoAcid::LEU,
            'K' => AminoAcid::LYS,
            'M' => AminoAcid::MET,
            'F' => AminoAcid::PHE,
            'P' => AminoAcid::PRO,
            'S' => AminoAcid::SER,
            'T' => AminoAcid::THR,
            'W' => AminoAcid::TRP,
            'Y' => AminoAcid::TYR,
            'V' => AminoAcid::VAL,
            'U' => AminoAcid::SEC,
            'O' => AminoAcid::PYL,
            'Z' => AminoAcid::GLX,
            'B' => AminoAcid::ASX,
            'X' => AminoAcid::UNK,
            _ => return None,
        };
        Some(residue)
    }

    /// Selenocysteine, pyrrolysine, and the ambiguous Glx/Asx codes.
    pub fn is_rare(self) -> bool {
        matches!(
            self,
            AminoAcid::SEC | AminoAcid::PYL | AminoAcid::GLX | AminoAcid::ASX
        )
    }

    pub fn is_unknown(self) -> bool {
        self == AminoAcid::UNK
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let code = match self {
            AminoAcid::ALA => "ALA",
            AminoAcid::ARG => "ARG",
            AminoAcid::ASN => "ASN",
            AminoAcid::ASP => "ASP",
            AminoAcid::CYS => "CYS",
            AminoAcid::GLN => "GLN",
            AminoAcid::GLU => "GLU",
            AminoAcid::GLY => "GLY",
            AminoAcid::HIS => "HIS",
            AminoAcid::ILE => "ILE",
            AminoAcid::LEU => "LEU",
            AminoAcid::LYS => "LYS",
            AminoAcid::MET => "MET",
            AminoAcid::PHE => "PHE",
            AminoAcid::PRO => "PRO",
            AminoAcid::SER => "SER",
            AminoAcid::THR => "THR",
            AminoAcid::TRP => "TRP",
            AminoAcid::TYR => "TYR",
            AminoAcid::VAL => "VAL",
            AminoAcid::SEC => "SEC",
            AminoAcid::PYL => "PYL",
            AminoAcid::GLX => "GLX",
            AminoAcid::ASX => "ASX",
            AminoAcid::UNK => "UNK",
        };
        write!(f, "{}", code)
    }
}
