//! Per-residue-type topology tables: rotatable side-chain bonds and hydrogen names.

/// Defines a single rotatable side-chain dihedral of a residue type.
///
/// The dihedral is identified by the four atom names ``a-b-c-d``; the ``b-c``
/// bond is the rotation axis and every atom downstream of ``c`` (away from
/// ``b``) moves with the angle.
#[derive(Clone, Debug)]
pub struct ChiDefinition {
    /// name of the angle, e.g. ``"chi0"``
    pub name: String,
    /// the four atom names defining the dihedral
    pub atoms: [String; 4],
}

impl ChiDefinition {
    /// Names of the two atoms forming the rotation axis
    pub fn axis(&self) -> (&str, &str) { (&self.atoms[1], &self.atoms[2]) }
}

/// Rotatable side-chain dihedrals of the standard amino acids.
///
/// Each line holds: three-letter code, angle name and the four atom names.
/// Residue types absent from this table (e.g. ``ALA``, ``GLY``) have no
/// rotatable side-chain bonds.
pub(crate) const ROTATABLE_BONDS: &str = "\
ARG chi0 N CA CB CG
ARG chi1 CA CB CG CD
ARG chi2 CB CG CD NE
ARG chi3 CG CD NE CZ
ASN chi0 N CA CB CG
ASN chi1 CA CB CG OD1
ASP chi0 N CA CB CG
ASP chi1 CA CB CG OD1
CYS chi0 N CA CB SG
GLN chi0 N CA CB CG
GLN chi1 CA CB CG CD
GLN chi2 CB CG CD OE1
GLU chi0 N CA CB CG
GLU chi1 CA CB CG CD
GLU chi2 CB CG CD OE1
HIS chi0 N CA CB CG
HIS chi1 CA CB CG ND1
ILE chi0 N CA CB CG1
ILE chi1 CA CB CG1 CD1
LEU chi0 N CA CB CG
LEU chi1 CA CB CG CD1
LYS chi0 N CA CB CG
LYS chi1 CA CB CG CD
LYS chi2 CB CG CD CE
LYS chi3 CG CD CE NZ
MET chi0 N CA CB CG
MET chi1 CA CB CG SD
MET chi2 CB CG SD CE
PHE chi0 N CA CB CG
PHE chi1 CA CB CG CD1
PRO chi0 N CA CB CG
PRO chi1 CA CB CG CD
SER chi0 N CA CB OG
THR chi0 N CA CB OG1
TRP chi0 N CA CB CG
TRP chi1 CA CB CG CD1
TYR chi0 N CA CB CG
TYR chi1 CA CB CG CD1
VAL chi0 N CA CB CG1
";

/// Hydrogen atoms expected on each heavy atom of the standard amino acids.
///
/// Each line holds: three-letter code, heavy atom name and the names of its
/// hydrogens. Heavy atoms that carry no hydrogen are not listed. The table
/// follows the wwPDB version-3 hydrogen nomenclature.
pub(crate) const HYDROGEN_NAMES: &str = "\
ALA N H
ALA CA HA
ALA CB HB1 HB2 HB3
ARG N H
ARG CA HA
ARG CB HB2 HB3
ARG CG HG2 HG3
ARG CD HD2 HD3
ARG NE HE
ARG NH1 HH11 HH12
ARG NH2 HH21 HH22
ASN N H
ASN CA HA
ASN CB HB2 HB3
ASN ND2 HD21 HD22
ASP N H
ASP CA HA
ASP CB HB2 HB3
CYS N H
CYS CA HA
CYS CB HB2 HB3
CYS SG HG
GLN N H
GLN CA HA
GLN CB HB2 HB3
GLN CG HG2 HG3
GLN NE2 HE21 HE22
GLU N H
GLU CA HA
GLU CB HB2 HB3
GLU CG HG2 HG3
GLY N H
GLY CA HA2 HA3
HIS N H
HIS CA HA
HIS CB HB2 HB3
HIS ND1 HD1
HIS CD2 HD2
HIS CE1 HE1
HIS NE2 HE2
ILE N H
ILE CA HA
ILE CB HB
ILE CG1 HG12 HG13
ILE CG2 HG21 HG22 HG23
ILE CD1 HD11 HD12 HD13
LEU N H
LEU CA HA
LEU CB HB2 HB3
LEU CG HG
LEU CD1 HD11 HD12 HD13
LEU CD2 HD21 HD22 HD23
LYS N H
LYS CA HA
LYS CB HB2 HB3
LYS CG HG2 HG3
LYS CD HD2 HD3
LYS CE HE2 HE3
LYS NZ HZ1 HZ2 HZ3
MET N H
MET CA HA
MET CB HB2 HB3
MET CG HG2 HG3
MET CE HE1 HE2 HE3
PHE N H
PHE CA HA
PHE CB HB2 HB3
PHE CD1 HD1
PHE CD2 HD2
PHE CE1 HE1
PHE CE2 HE2
PHE CZ HZ
PRO CA HA
PRO CB HB2 HB3
PRO CG HG2 HG3
PRO CD HD2 HD3
SER N H
SER CA HA
SER CB HB2 HB3
SER OG HG
THR N H
THR CA HA
THR CB HB
THR OG1 HG1
THR CG2 HG21 HG22 HG23
TRP N H
TRP CA HA
TRP CB HB2 HB3
TRP CD1 HD1
TRP NE1 HE1
TRP CE3 HE3
TRP CZ2 HZ2
TRP CZ3 HZ3
TRP CH2 HH2
TYR N H
TYR CA HA
TYR CB HB2 HB3
TYR CD1 HD1
TYR CD2 HD2
TYR CE1 HE1
TYR CE2 HE2
TYR OH HH
VAL N H
VAL CA HA
VAL CB HB
VAL CG1 HG11 HG12 HG13
VAL CG2 HG21 HG22 HG23
";

/// Element properties of the atoms found in protein structures.
///
/// Each line holds: element symbol, van der Waals radius, the three covalent
/// radii ordered ``sp3 sp2 sp`` and the partial charge. All radii in
/// Angstroms, charges in elementary charge units.
pub(crate) const ELEMENT_PROPERTIES: &str = "\
H  1.20 0.32 0.32 0.32  0.10
C  1.70 0.75 0.67 0.60  0.05
N  1.55 0.71 0.62 0.54 -0.35
O  1.52 0.63 0.57 0.53 -0.45
F  1.47 0.64 0.59 0.53 -0.20
P  1.80 1.11 1.02 0.94  0.30
S  1.80 1.03 0.94 0.95 -0.15
SE 1.90 1.16 1.07 1.07 -0.15
";
