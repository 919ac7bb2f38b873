//! Election parameters: the embedded group sets and the public commitment
//! and pseudonym generators fixed at genesis.

use num_bigint::BigUint;
use num_traits::One;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use crate::arith::GStarModPrime;
use crate::commitment::PedersenCommitmentScheme;
use crate::error::Error;

/// Default soundness parameter of the representation proof, giving a
/// cheating probability of about 2^-80.
pub const DEFAULT_SECURITY_PARAM: usize = 80;

// The election group constants. Each set is a triple of primes (o, p, q)
// with p = r*q + 1 and o = s*p + 1 for integer cofactors r and s, so that
// G_p (order p inside Z*_o) and G_q (order q inside Z*_p) nest as the two
// proof systems require. The sets are embedded verbatim for
// interoperability; nodes must agree on them bit for bit.

// 160 bit, order q of G_q.
const Q_160: &str = "1081119563825030427708677600856959359670713108783";
// P = a * Q + 1, 1024 bit, order p of G_p and modulus of G_q.
const P_160: &str = "132981118064499312972124229719551507064282251442693318094413647002876359530119444044769383265695686373097209253015503887096288112369989708235068428214124661556800389180762828009952422599372290980806417384771730325122099441368051976156139223257233269955912341167062173607119895128870594055324929155200165347329";
// O = 981 * P + 1, 1034 bit, modulus of G_p.
const O_160: &str = "130321495703209326712681745125160476922996606413839451732525374062818832339517055163873995600381772645635265067955193809354362350122589914070367059649842168325664381397147571449753374147384845161190289037076295718619657452540690936633016438792088604556794094343720930134977497226293182174218430572096162040382421";

// 1023 bit, order q of G_q.
const Q_1024: &str = "62419754450729612647565739452383276575857601899739936725159851334944150841968063259516646199602063446032019699733384807429406029957259175802747488347623169473252390835604139741777023566843030652585465424928737851640689453666654947197163915037792214904944077385094485372296355878304667660119111336076574627993";
// P = 2 * Q + 1, 1024 bit, order p of G_p and modulus of G_q.
const P_1024: &str = "124839508901459225295131478904766553151715203799479873450319702669888301683936126519033292399204126892064039399466769614858812059914518351605494976695246338946504781671208279483554047133686061305170930849857475703281378907333309894394327830075584429809888154770188970744592711756609335320238222672153149255987";
// O = 325 * P + 1, modulus of G_p.
const O_1024: &str = "40448000884072788995622599165144363221155726031031478997903583665043809745595304992166786737342137113028748765427233355214255107412303945920180372449259813818667549261471482552671511271314283862875381595353822127863166765975992405783762216944489355258403762145541226521248038609141424643757184145777620358939789";

// 2047 bit, order q of G_q.
const Q_2048: &str = "16158503035655503650357438344334975980222051334857742016065172713762327569433945446598600705761456731844358980460949009747059779575245460547544076193224141560315438683650498045875098875194826053398028819192033784138396109321309878080919047169238085235290822926018152521443787945770532904303776199561965192760957166694834171210342487393282284747428088017663161029038902829665513096354230157075129296432088558362971801859230928678799175576150822952201848806616643615613562842355410104862578550863465661734839271290328348967522998634176499319107762583194718667771801067716614802322659239302476074096777926805529797144183";
// P = 2 * Q + 1, 2048 bit, order p of G_p and modulus of G_q.
const P_2048: &str = "32317006071311007300714876688669951960444102669715484032130345427524655138867890893197201411522913463688717960921898019494119559150490921095088152386448283120630877367300996091750197750389652106796057638384067568276792218642619756161838094338476170470581645852036305042887575891541065808607552399123930385521914333389668342420684974786564569494856176035326322058077805659331026192708460314150258592864177116725943603718461857357598351152301645904403697613233287231227125684710820209725157101726931323469678542580656697935045997268352998638215525166389437335543602135433229604645318478604952148193555853611059594288367";
// O = 3157 * P + 1, modulus of G_p.
const O_2048: &str = "101992471161057539041056150829442368387161588025622067605403370169267811618267063658930367654766314891401593884669510149523441328678949346976098208931630781528711048971201943665563624100229742049048357906740117245481556242036107950446761025732230794005155674309026578715353189513703603691965435371635124296707161636177793288679681780426397781325766091567489872415293554660848718664187900751458216119079342980387078013335465621820580396236663994474298069667364254501752808660947348581892595813050195256870305480384552538683005167378922063702208197425125064230975608339427272632260625118477228979698862273996504079574086253";

/// One of the embedded election group sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSet {
    /// 160-bit q, 1024-bit p, 1034-bit o. The default set.
    Small,
    /// 1023-bit q, 1024-bit p.
    Medium,
    /// 2047-bit q, 2048-bit p.
    Large,
}

impl GroupSet {
    fn triple(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            GroupSet::Small => (O_160, P_160, Q_160),
            GroupSet::Medium => (O_1024, P_1024, Q_1024),
            GroupSet::Large => (O_2048, P_2048, Q_2048),
        }
    }

    /// The group G_p of order p inside Z*_o, hosting the commitment to u.
    pub fn group_p(&self) -> GStarModPrime {
        let (o, p, _) = self.triple();
        GStarModPrime::new(parse_uint(o), parse_uint(p))
            .expect("embedded election constants form a valid group")
    }

    /// The group G_q of order q inside Z*_p, hosting credentials,
    /// representations and pseudonyms.
    pub fn group_q(&self) -> GStarModPrime {
        let (_, p, q) = self.triple();
        GStarModPrime::new(parse_uint(p), parse_uint(q))
            .expect("embedded election constants form a valid group")
    }
}

fn parse_uint(s: &str) -> BigUint {
    BigUint::parse_bytes(s.as_bytes(), 10).expect("embedded constant is a base-10 integer")
}

/// The public election parameters every node agrees on at genesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// The scheme committing to the public credential u, in G_p.
    comm_p: PedersenCommitmentScheme,
    /// The scheme committing to the representation (alpha, beta), in G_q.
    comm_q: PedersenCommitmentScheme,
    /// The election generator for pseudonyms, an element of G_q.
    #[serde(rename = "h", with = "crate::tools::serde_decimal")]
    h_hat: BigUint,
    /// The soundness parameter of the representation proof.
    #[serde(rename = "k")]
    security_param: usize,
}

impl Params {
    /// Bundles the given schemes and election generator into a parameter
    /// set, checking the soundness requirement 2^k < ord(G_p).
    pub fn new(
        comm_p: PedersenCommitmentScheme,
        comm_q: PedersenCommitmentScheme,
        h_hat: BigUint,
        security_param: usize,
    ) -> Result<Self, Error> {
        if *comm_p.group().order() <= (BigUint::one() << security_param) {
            return Err(Error::SecurityParamTooLarge);
        }
        Ok(Self {
            comm_p,
            comm_q,
            h_hat,
            security_param,
        })
    }

    /// Generates a parameter set over one of the embedded group sets with
    /// freshly sampled generators.
    pub fn generate(
        rng: &mut impl CryptoRngCore,
        set: GroupSet,
        security_param: usize,
    ) -> Result<Self, Error> {
        let group_p = set.group_p();
        let comm_p = PedersenCommitmentScheme::new(
            group_p.clone(),
            group_p.random_generator(rng),
            vec![group_p.random_generator(rng)],
        )?;

        let group_q = set.group_q();
        let comm_q = PedersenCommitmentScheme::new(
            group_q.clone(),
            group_q.random_generator(rng),
            vec![group_q.random_generator(rng), group_q.random_generator(rng)],
        )?;

        let h_hat = group_q.random_element(rng);
        Self::new(comm_p, comm_q, h_hat, security_param)
    }

    pub fn comm_p(&self) -> &PedersenCommitmentScheme {
        &self.comm_p
    }

    pub fn comm_q(&self) -> &PedersenCommitmentScheme {
        &self.comm_q
    }

    /// The election generator for pseudonyms.
    pub fn h_hat(&self) -> &BigUint {
        &self.h_hat
    }

    pub fn security_param(&self) -> usize {
        self.security_param
    }
}
