/// Record types the processor reacts to, keyed by the six-character tag in columns 1-6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Header,
    Remark,
    DbRef,
    /// First half of a two-line cross-reference; its accession sits on the following line.
    DbRef1,
    SeqRes,
    Atom,
    /// Chain terminator; closes the current model.
    Ter,
    Other,
}

impl Record {
    /// Classifies a line by its record tag.
    ///
    /// Tags are compared with trailing blanks removed so that short lines such as a bare `TER`
    /// still dispatch, while `DBREF1` and `DBREF2` stay distinct from `DBREF`.
    pub fn classify(line: &str) -> Self {
        let tag = line.get(..6).unwrap_or(line);
        match tag.trim_end() {
            "HEADER" => Record::Header,
            "REMARK" => Record::Remark,
            "DBREF" => Record::DbRef,
            "DBREF1" => Record::DbRef1,
            "SEQRES" => Record::SeqRes,
            "ATOM" => Record::Atom,
            "TER" => Record::Ter,
            _ => Record::Other,
        }
    }
}
