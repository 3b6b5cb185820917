//! GraphQL documents sent to the Blitnauts subgraph

/// Field selection shared by every query
macro_rules! blitnaut_fields {
    () => {
        "
            id
            numericId
            owner
            name
            frameId
            base
            edition
            blitmapId
            colorIds
            colors
            backgroundColorId
            backgroundColor
        "
    };
}

/// Single entity lookup. Variables: `blitnautId`.
pub const GET_BY_ID: &str = concat!(
    "query getBlitnaut($blitnautId: Int!) {\n",
    "    blitnaut(id: $blitnautId) {",
    blitnaut_fields!(),
    "    }\n",
    "}\n"
);

/// Everything past a cursor, ascending. Variables: `mostRecentBlitnautId`.
pub const GET_AFTER_ID: &str = concat!(
    "query getBlitnautsAfterId($mostRecentBlitnautId: Int!) {\n",
    "    blitnauts(\n",
    "        where: { numericId_gt: $mostRecentBlitnautId }\n",
    "        orderBy: id\n",
    "        orderDirection: asc\n",
    "    ) {",
    blitnaut_fields!(),
    "    }\n",
    "}\n"
);

/// One page in backend order. Variables: `first`, `skip`.
pub const GET_PAGE: &str = concat!(
    "query getAllBlitnauts($first: Int!, $skip: Int!) {\n",
    "    blitnauts(first: $first, skip: $skip) {",
    blitnaut_fields!(),
    "    }\n",
    "}\n"
);
